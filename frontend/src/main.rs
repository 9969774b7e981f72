mod api;
mod components;
mod storage;

use components::header::render_header;
use components::results::render_results;
use components::theme_toggle::render_theme_toggle;
use components::upload_form::render_upload_form;
use shared::submission::{PredictionFlow, ResultRegion, Ticket};
use shared::theme::ThemeToggle;
use storage::{BodyClassMarker, LocalStorageStore};
use wasm_bindgen_futures::spawn_local;
use web_sys::{FormData, HtmlFormElement};
use yew::prelude::*;

// Yew msg components
enum Msg {
    ToggleTheme,
    Submit,
    PredictionFinished(Ticket, ResultRegion),
}

// Main component
struct Model {
    theme: Option<ThemeToggle<LocalStorageStore, BodyClassMarker>>,
    form_ref: NodeRef,
    prediction: PredictionFlow,
}

impl Component for Model {
    type Message = Msg;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        let theme = BodyClassMarker::from_document().map(|marker| {
            let mut toggle = ThemeToggle::new(LocalStorageStore, marker);
            toggle.on_ready();
            toggle
        });

        if theme.is_none() {
            log::error!("No document body; theme toggle disabled");
        }

        Self {
            theme,
            form_ref: NodeRef::default(),
            prediction: PredictionFlow::default(),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::ToggleTheme => self.handle_toggle_theme(),
            Msg::Submit => self.handle_submit(ctx),
            Msg::PredictionFinished(ticket, region) => {
                self.handle_prediction_finished(ticket, region)
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        html! {
            <div class="container">
                { render_header() }
                <div class="top-right">
                    { render_theme_toggle(self.is_dark(), ctx.link()) }
                </div>

                <main class="main-content">
                    { render_upload_form(self, ctx) }
                    { render_results(self.prediction.region()) }
                </main>

                <footer class="app-footer">
                    <p>{"Tomato Leaf Disease Detection | Fullstack Rust WASM"}</p>
                </footer>
            </div>
        }
    }
}

// Handler methods
impl Model {
    fn is_dark(&self) -> bool {
        self.theme
            .as_ref()
            .is_some_and(|toggle| toggle.preference().is_enabled())
    }

    fn handle_toggle_theme(&mut self) -> bool {
        let Some(toggle) = self.theme.as_mut() else {
            return false;
        };

        match toggle.on_click() {
            Ok(preference) => log::debug!("Theme preference: {}", preference),
            Err(e) => log::error!("{}", e),
        }
        true
    }

    fn handle_submit(&mut self, ctx: &Context<Self>) -> bool {
        let Some(form) = self.form_ref.cast::<HtmlFormElement>() else {
            log::error!("Upload form is not mounted");
            return false;
        };

        // Supersede any request still in flight before anything can fail.
        let ticket = self.prediction.submit();

        let form_data = match FormData::new_with_form(&form) {
            Ok(form_data) => form_data,
            Err(e) => {
                log::error!("Could not read the upload form: {:?}", e);
                self.prediction.finish(ticket, ResultRegion::error(format!("{:?}", e)));
                return true;
            }
        };

        let link = ctx.link().clone();
        spawn_local(async move {
            let region = api::submit_prediction(form_data).await;
            link.send_message(Msg::PredictionFinished(ticket, region));
        });

        true
    }

    fn handle_prediction_finished(&mut self, ticket: Ticket, region: ResultRegion) -> bool {
        let applied = self.prediction.finish(ticket, region);
        if !applied {
            log::debug!("Dropping response to superseded submission {:?}", ticket);
        }
        applied
    }
}

fn main() {
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("App starting...");
    yew::Renderer::<Model>::new().render();
}
