use log::info;
use yew::prelude::*;

use super::dom::install;

/// Binds the hero snap once the page has rendered and unbinds it when the
/// page unmounts.
#[hook]
pub fn use_hero_snap() {
    use_effect_with_deps(
        move |_| {
            let handle = match install() {
                Ok(handle) => Some(handle),
                Err(e) => {
                    info!("Hero snap not bound: {}", e);
                    None
                }
            };
            move || drop(handle)
        },
        (),
    );
}
