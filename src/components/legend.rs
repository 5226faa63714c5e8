use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct LegendRowProps {
    pub color: &'static str,
    pub label: AttrValue,
    #[prop_or(false)]
    pub round: bool,
}

#[function_component(LegendRow)]
pub fn legend_row(props: &LegendRowProps) -> Html {
    let radius = if props.round { "50%" } else { "2px" };
    html! { <div style="display:flex; align-items:center; gap:8px; margin:3px 0;"> <span style={format!("display:inline-block; width:12px; height:12px; background:{}; border:1px solid #30363d; border-radius:{};", props.color, radius)}></span> <span>{ props.label.clone() }</span> </div> }
}
