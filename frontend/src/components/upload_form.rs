use super::super::Model;
use super::super::Msg;
use shared::UPLOAD_FIELD;
use yew::prelude::*;

pub fn render_upload_form(model: &Model, ctx: &Context<Model>) -> Html {
    let onsubmit = ctx.link().callback(|e: SubmitEvent| {
        e.prevent_default();
        Msg::Submit
    });

    html! {
        <form id="upload-form" class="upload-section" ref={model.form_ref.clone()} {onsubmit}>
            <label for="file-input" class="upload-label">{"Choose a leaf image"}</label>
            <input
                type="file"
                id="file-input"
                name={UPLOAD_FIELD}
                accept="image/png, image/jpeg, image/gif"
            />
            <p class="file-types">{"Supported formats: PNG, JPG, JPEG, GIF"}</p>
            <button type="submit" class="analyze-btn">
                <i class="fa-solid fa-magnifying-glass"></i>{" Predict"}
            </button>
        </form>
    }
}
