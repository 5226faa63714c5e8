use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct GameOverOverlayProps {
    pub show: bool,
    pub score: u32,
    pub level: usize,
    pub completed: usize,
    pub total_levels: usize,
    pub restart: Callback<()>,
}

#[function_component]
pub fn GameOverOverlay(props: &GameOverOverlayProps) -> Html {
    if !props.show {
        return html! {};
    }
    let restart_cb = props.restart.clone();
    let restart_btn = Callback::from(move |_| restart_cb.emit(()));
    html! {
        <div style="position:absolute; top:50%; left:50%; transform:translate(-50%, -50%); background:rgba(0,0,0,0.85); border:2px solid #f85149; padding:24px 32px; border-radius:12px; text-align:center; min-width:320px;">
            <h2 style="margin:0 0 12px 0; color:#f85149;">{"Game Over"}</h2>
            <p style="margin:4px 0;">{ format!("Final Score: {}", props.score) }</p>
            <p style="margin:4px 0;">{ format!("Reached Level: {}", props.level) }</p>
            <p style="margin:4px 0;">{ format!("Levels Completed: {}/{}", props.completed, props.total_levels) }</p>
            <div style="margin-top:16px; display:flex; gap:12px; justify-content:center;">
                <button onclick={restart_btn}>{"Restart"}</button>
            </div>
        </div>
    }
}
