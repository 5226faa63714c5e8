use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct IntroOverlayProps {
    pub show: bool,
    pub game_over: bool,
    pub scheme_label: AttrValue,
    pub hide_intro: Callback<()>,
}

#[function_component(IntroOverlay)]
pub fn intro_overlay(props: &IntroOverlayProps) -> Html {
    if !props.show || props.game_over {
        return html! {};
    }
    let hide_cb = props.hide_intro.clone();
    let start_btn = Callback::from(move |_| hide_cb.emit(()));
    html! {
        <div style="position:absolute; top:50%; left:50%; transform:translate(-50%, -50%); background:rgba(0,0,0,0.87); border:2px solid #30363d; padding:28px 36px; border-radius:14px; max-width:520px; width:90%; box-shadow:0 0 0 1px #1a1f24, 0 6px 18px rgba(0,0,0,0.6); font-size:14px; line-height:1.4; z-index:40;">
            <h2 style="margin:0 0 12px 0; font-size:22px; color:#58a6ff; text-align:center;">{"Dungeon Grid"}</h2>
            <p style="margin:4px 0 10px 0; text-align:center; opacity:0.85;">{"Clear each room, then take the exit."}</p>
            <ul style="margin:0 0 12px 18px; padding:0; list-style:disc; display:flex; flex-direction:column; gap:4px;">
                <li>{ format!("Move and attack with {}.", props.scheme_label) }</li>
                <li>{"Your attack strikes the tile you are facing."}</li>
                <li>{"Slicers sweep sideways; Skeletors pace up and down."}</li>
                <li>{"Touching an enemy costs health, more on later levels. You get a second of safety after each hit."}</li>
                <li>{"Health slowly comes back if you avoid damage."}</li>
                <li>{"The top door and stairs only open once every enemy is gone."}</li>
                <li>{"Beat every level to unlock level select."}</li>
            </ul>
            <div style="display:flex; gap:12px; justify-content:center; margin-top:8px;">
                <button onclick={start_btn}>{"Start"}</button>
            </div>
        </div>
    }
}
