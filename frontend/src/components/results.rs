use shared::submission::ResultRegion;
use yew::prelude::*;

pub fn render_results(region: &ResultRegion) -> Html {
    let content = match region {
        ResultRegion::Idle => html! {},
        ResultRegion::Predicting => html! {
            <p class="predicting">
                <i class="fa-solid fa-spinner fa-spin"></i>
                { region.text().unwrap_or_default() }
            </p>
        },
        ResultRegion::Error(message) => html! {
            <p class="error-message">{ message }</p>
        },
        ResultRegion::Success(prediction) => html! {
            <>
                <h3>{ format!("Prediction: {}", prediction.predicted_label) }</h3>
                <p><strong>{"Cause:"}</strong>{ format!(" {}", prediction.cause) }</p>
                <p><strong>{"Prevention:"}</strong>{ format!(" {}", prediction.prevention) }</p>
                <img
                    src={prediction.uploaded_file_url.clone()}
                    alt="Uploaded Leaf Image"
                    style="max-width: 300px; margin-top: 10px;"
                />
            </>
        },
    };

    html! {
        <div id="result" class="results-container" aria-live="polite">
            { content }
        </div>
    }
}
