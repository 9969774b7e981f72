use super::super::Model;
use super::super::Msg;
use yew::html::Scope;
use yew::prelude::*;

const TWEMOJI_SVG: &str = "https://cdnjs.cloudflare.com/ajax/libs/twemoji/14.0.2/svg";

pub fn render_theme_toggle(dark: bool, link: &Scope<Model>) -> Html {
    html! {
        <button
            id="darkModeToggle"
            class="theme-toggle"
            onclick={link.callback(|_| Msg::ToggleTheme)}
            title={ if dark { "Switch to Light Mode" } else { "Switch to Dark Mode" } }
        >
            { if dark {
                html! {
                    <img
                        src={format!("{}/1f319.svg", TWEMOJI_SVG)}
                        alt="Moon Icon"
                        class="toggle-icon"
                    />
                }
            } else {
                html! {
                    <img
                        src={format!("{}/2600.svg", TWEMOJI_SVG)}
                        alt="Sun Icon"
                        class="toggle-icon"
                    />
                }
            }}
        </button>
    }
}
