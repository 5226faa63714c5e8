use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct ControlsPanelProps {
    pub scheme_label: AttrValue,
    pub levels_unlocked: bool,
    pub on_open_settings: Callback<()>,
    pub on_open_levels: Callback<()>,
    pub on_show_help: Callback<()>,
    pub on_restart: Callback<()>,
}

#[function_component]
pub fn ControlsPanel(props: &ControlsPanelProps) -> Html {
    let settings_cb = {
        let cb = props.on_open_settings.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let levels_cb = {
        let cb = props.on_open_levels.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let help_cb = {
        let cb = props.on_show_help.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let restart_cb = {
        let cb = props.on_restart.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let levels_label = if props.levels_unlocked { "Levels" } else { "Levels (locked)" };
    html! {<div style="position:absolute; top:12px; right:12px; background:rgba(22,27,34,0.9); border:1px solid #30363d; border-radius:8px; padding:8px; min-width:200px; display:flex; flex-direction:column; gap:6px;">
        <button onclick={settings_cb}>{"Settings"}</button>
        <button onclick={levels_cb}>{ levels_label }</button>
        <button onclick={restart_cb}>{"Restart"}</button>
        <button onclick={help_cb}>{"Help"}</button>
        <div style="font-size:11px; opacity:0.7;">{ format!("Controls: {}", props.scheme_label) }</div>
    </div>}
}
