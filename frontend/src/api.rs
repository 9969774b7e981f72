use gloo_net::http::Request;
use shared::PREDICT_ENDPOINT;
use shared::submission::ResultRegion;
use web_sys::FormData;

/// Posts the form to the prediction endpoint and turns whatever comes back
/// into the next state of the result region.
pub async fn submit_prediction(form_data: FormData) -> ResultRegion {
    let request = match Request::post(PREDICT_ENDPOINT).body(form_data) {
        Ok(request) => request,
        Err(e) => return ResultRegion::error(failure_message(&e)),
    };

    let response = match request.send().await {
        Ok(response) => response,
        Err(e) => {
            log::warn!("Prediction request failed: {}", e);
            return ResultRegion::error(failure_message(&e));
        }
    };

    match response.text().await {
        Ok(body) => {
            if !response.ok() {
                log::warn!("Prediction endpoint returned {}", response.status());
            }
            ResultRegion::from_response(response.ok(), &body)
        }
        Err(e) => ResultRegion::error(failure_message(&e)),
    }
}

// A rejected fetch carries a JS error whose message is what users expect to
// see, e.g. "Failed to fetch".
fn failure_message(err: &gloo_net::Error) -> String {
    match err {
        gloo_net::Error::JsError(js) => js.message.clone(),
        other => other.to_string(),
    }
}
