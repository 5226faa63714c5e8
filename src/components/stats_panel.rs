use crate::util::format_hearts;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct StatsPanelProps {
    pub score: u32,
    /// 1-based level number.
    pub level: usize,
    pub level_name: AttrValue,
    pub enemies: usize,
    pub hearts: (u32, u32),
}

#[function_component]
pub fn StatsPanel(props: &StatsPanelProps) -> Html {
    let row_style = "display:flex; align-items:center; gap:8px;"; // icon | label | value
    let icon_style = "width:20px; text-align:center; flex-shrink:0;";
    let label_style = "flex:1; font-weight:500;";
    let value_style =
        "min-width:70px; text-align:right; font-variant-numeric:tabular-nums; font-weight:600;";
    let (filled, empty) = props.hearts;
    html! {
        <div style="position:absolute; top:12px; left:12px; background:rgba(22,27,34,0.9); border:1px solid #30363d; border-radius:8px; padding:10px 14px; min-width:230px; display:flex; flex-direction:column; gap:10px; font-size:14px;">
            <div style={row_style}>
                <span style={format!("{} color:#f85149;", icon_style)}>{"❤"}</span>
                <span style={format!("{} color:#f85149;", label_style)}>{"Health"}</span>
                <span style={format!("{} color:#f85149; letter-spacing:2px;", value_style)}>{ format_hearts(filled, empty) }</span>
            </div>
            <div style={row_style}>
                <span style={format!("{} color:#d4af37;", icon_style)}>{"★"}</span>
                <span style={format!("{} color:#d4af37;", label_style)}>{"Score"}</span>
                <span style={format!("{} color:#d4af37;", value_style)}>{ props.score }</span>
            </div>
            <div style={row_style}>
                <span style={format!("{} color:#58a6ff;", icon_style)}>{"⌂"}</span>
                <span style={format!("{} color:#58a6ff;", label_style)}>{ format!("Level {}", props.level) }</span>
                <span style={format!("{} color:#58a6ff; font-weight:400; font-size:12px;", value_style)}>{ props.level_name.clone() }</span>
            </div>
            <div style={row_style}>
                <span style={format!("{} color:#a371f7;", icon_style)}>{"☠"}</span>
                <span style={format!("{} color:#a371f7;", label_style)}>{"Enemies"}</span>
                <span style={format!("{} color:#a371f7;", value_style)}>{ props.enemies }</span>
            </div>
        </div>
    }
}
