use std::rc::Rc;

use super::game_view::GameView;
use crate::config::LevelCatalog;
use crate::model::GameSession;
use crate::util::clog;
use yew::prelude::*;

#[derive(Properties, Clone)]
struct SessionRootProps {
    initial: Rc<GameSession>,
}

impl PartialEq for SessionRootProps {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.initial, &other.initial)
    }
}

/// Owns the reducer once the catalog has loaded.
#[function_component(SessionRoot)]
fn session_root(props: &SessionRootProps) -> Html {
    let session = {
        let initial = props.initial.clone();
        use_reducer(move || (*initial).clone())
    };
    html! { <GameView session={session} /> }
}

#[function_component(App)]
pub fn app() -> Html {
    let loaded = use_memo((), |_| {
        let seed = (js_sys::Math::random() * u32::MAX as f64) as u64;
        LevelCatalog::bundled()
            .and_then(|catalog| GameSession::new(catalog, seed))
            .map(Rc::new)
    });

    match &*loaded {
        Ok(initial) => html! { <SessionRoot initial={initial.clone()} /> },
        Err(err) => {
            clog(&format!("failed to load levels: {err}"));
            html! {
                <div style="padding:24px; color:#f85149; font-family:sans-serif;">
                    <h2>{"Could not load the dungeon"}</h2>
                    <p>{ err.to_string() }</p>
                </div>
            }
        }
    }
}
