use super::legend::LegendRow;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct LegendPanelProps {
    /// Exits are drawn lit once the room is clear.
    pub exits_open: bool,
}

#[function_component]
pub fn LegendPanel(props: &LegendPanelProps) -> Html {
    let (exit_color, exit_label) = if props.exits_open {
        ("#2ea043", "Exit (open)")
    } else {
        ("#5c3a1e", "Exit (locked)")
    };
    html! {<div style="position:absolute; right:12px; bottom:12px; background:rgba(22,27,34,0.9); border:1px solid #30363d; border-radius:8px; padding:8px; min-width:170px;">
        <div style="font-weight:600; margin-bottom:4px;">{"Legend"}</div>
        <LegendRow color="#58a6ff" label="You" round={true} />
        <LegendRow color="#a371f7" label="Slicer" round={true} />
        <LegendRow color="#e6edf3" label="Skeletor" round={true} />
        <LegendRow color="#3c4454" label="Wall" />
        <LegendRow color="#8b5a2b" label="Side door" />
        <LegendRow color={exit_color} label={exit_label} />
        <LegendRow color="#f85149" label="Fire pot" />
        <LegendRow color="#d4af37" label="Lanterns" />
    </div>}
}
