use crate::model::ControlScheme;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct SettingsModalProps {
    pub show: bool,
    pub on_close: Callback<()>,
    pub enemy_speed: f64,
    pub min_speed: f64,
    pub max_speed: f64,
    pub on_enemy_speed: Callback<f64>,
    pub scheme: ControlScheme,
    pub on_scheme: Callback<ControlScheme>,
}

#[function_component]
pub fn SettingsModal(props: &SettingsModalProps) -> Html {
    if !props.show {
        return html! {};
    }

    let close_cb = {
        let cb = props.on_close.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let speed_cb = {
        let cb = props.on_enemy_speed.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            if let Ok(v) = input.value().parse::<f64>() {
                cb.emit(v);
            }
        })
    };
    let scheme_cb = {
        let cb = props.on_scheme.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            if let Some(scheme) = ControlScheme::from_key(&select.value()) {
                cb.emit(scheme);
            }
        })
    };

    html! {<div style="position:absolute; inset:0; display:flex; align-items:center; justify-content:center; background:rgba(0,0,0,0.55); z-index:50;">
        <div style="background:#161b22; border:1px solid #30363d; border-radius:12px; padding:16px 20px; min-width:340px; max-width:480px; display:flex; flex-direction:column; gap:14px;">
            <div style="display:flex; justify-content:space-between; align-items:center;">
                <h3 style="margin:0; font-size:18px;">{"Settings"}</h3>
                <button onclick={close_cb.clone()} style="padding:4px 8px;">{"Close"}</button>
            </div>
            <div style="display:flex; flex-direction:column; gap:10px;">
                <label style="display:flex; align-items:center; gap:8px;">
                    <span style="flex:1;">{"Enemy Speed"}</span>
                    <input type="range"
                        min={props.min_speed.to_string()}
                        max={props.max_speed.to_string()}
                        step="0.25"
                        value={props.enemy_speed.to_string()}
                        oninput={speed_cb} />
                    <span style="min-width:44px; text-align:right; font-variant-numeric:tabular-nums;">{ format!("{:.2}x", props.enemy_speed) }</span>
                </label>
                <label style="display:flex; align-items:center; gap:8px;">
                    <span style="flex:1;">{"Controls"}</span>
                    <select onchange={scheme_cb}>
                        { for ControlScheme::ALL.iter().map(|s| html!{
                            <option value={s.key()} selected={*s == props.scheme}>{ s.label() }</option>
                        }) }
                    </select>
                </label>
            </div>
            <div style="display:flex; gap:8px; justify-content:flex-end;">
                <button onclick={close_cb}>{"Done"}</button>
            </div>
        </div>
    </div>}
}
