use dungeon_grid::components::app::App;

fn main() {
    yew::Renderer::<App>::new().render();
}
