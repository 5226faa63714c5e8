use yew::prelude::*;

#[derive(Clone, PartialEq)]
pub struct LevelEntry {
    pub name: AttrValue,
    pub completed: bool,
}

#[derive(Properties, PartialEq, Clone)]
pub struct LevelSelectProps {
    pub show: bool,
    pub unlocked: bool,
    pub current: usize,
    pub levels: Vec<LevelEntry>,
    pub on_select: Callback<usize>,
    pub on_close: Callback<()>,
}

#[function_component]
pub fn LevelSelect(props: &LevelSelectProps) -> Html {
    if !props.show {
        return html! {};
    }
    let close_cb = {
        let cb = props.on_close.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let done = props.levels.iter().filter(|l| l.completed).count();

    html! {<div style="position:absolute; inset:0; display:flex; align-items:center; justify-content:center; background:rgba(0,0,0,0.55); z-index:50;">
        <div style="background:#161b22; border:1px solid #30363d; border-radius:12px; padding:16px 20px; min-width:320px; display:flex; flex-direction:column; gap:12px;">
            <div style="display:flex; justify-content:space-between; align-items:center;">
                <h3 style="margin:0; font-size:18px;">{"Level Select"}</h3>
                <button onclick={close_cb} style="padding:4px 8px;">{"Close"}</button>
            </div>
            if !props.unlocked {
                <div style="font-size:12px; opacity:0.8;">
                    { format!("Clear every level to unlock ({}/{} done).", done, props.levels.len()) }
                </div>
            }
            <div style="display:grid; grid-template-columns:repeat(2, 1fr); gap:6px;">
                { for props.levels.iter().enumerate().map(|(i, level)| {
                    let on_select = props.on_select.clone();
                    let onclick = Callback::from(move |_| on_select.emit(i));
                    let marker = if level.completed { "✓ " } else { "" };
                    let border = if i == props.current { "#58a6ff" } else { "#30363d" };
                    html!{
                        <button {onclick} disabled={!props.unlocked}
                            style={format!("text-align:left; border:1px solid {};", border)}>
                            { format!("{}{}. {}", marker, i + 1, level.name) }
                        </button>
                    }
                }) }
            </div>
        </div>
    </div>}
}
