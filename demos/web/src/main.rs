//! Run with:
//!
//! ```sh
//! dx serve --platform web
//! ```
//!
//! Geolocation needs a secure context, so open the served page over
//! `https` or on `localhost`.

use dioxus::prelude::*;
use geofix_widget::GeolocationPanel;

fn main() {
    dioxus::launch(app);
}

fn app() -> Element {
    rsx! {
        Stylesheet { href: asset!("/assets/main.css") }
        header { class: "demo-header",
            h1 { "geofix" }
            p { "A permission-gated location panel. Allow or deny below, or flip the site permission in browser chrome and watch the panel follow." }
        }
        main { class: "demo-main",
            GeolocationPanel {}
        }
    }
}
