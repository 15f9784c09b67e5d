//! Host browser actions shared by the screen click-through and the
//! footer links. No-ops outside wasm so the native build stays runnable.

use bevy::prelude::*;

pub fn open_external_link(url: &str) {
    #[cfg(target_arch = "wasm32")]
    {
        match web_sys::window() {
            Some(window) => {
                match window.open_with_url_and_target_and_features(
                    url,
                    "_blank",
                    "noopener,noreferrer",
                ) {
                    Ok(Some(_)) => {}
                    Ok(None) => warn!("Browser blocked opening {url}"),
                    Err(error) => error!("Failed to open {url}: {error:?}"),
                }
            }
            None => error!("Window object not available"),
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    info!("Would open external link: {url}");
}
