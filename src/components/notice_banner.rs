use crate::model::NoticeTone;
use crate::util::format_remaining;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct NoticeBannerProps {
    pub text: Option<AttrValue>,
    pub tone: NoticeTone,
    pub remaining_ms: f64,
}

#[function_component(NoticeBanner)]
pub fn notice_banner(props: &NoticeBannerProps) -> Html {
    let Some(text) = props.text.clone() else {
        return html! {};
    };
    let color = match props.tone {
        NoticeTone::Warning => "#f85149",
        NoticeTone::Info => "#e6edf3",
    };
    html! {<div id="temp-message" style="position:absolute; top:12px; left:50%; transform:translateX(-50%); display:flex; flex-direction:column; align-items:center; gap:4px; background:rgba(0,0,0,0.8); border:1px solid #30363d; border-radius:8px; padding:8px 16px;">
        <div style={format!("font-size:18px; font-weight:600; color:{};", color)}>{ text }</div>
        <div style="font-size:11px; opacity:0.6;">{ format_remaining(props.remaining_ms) }</div>
    </div>}
}
