//! Hand-tracking bridge
//!
//! Drives MediaPipe Hands from the page's camera stream. Every processed
//! camera frame calls back with a flat `Float32Array` of `hands * 21 * 3`
//! normalized coordinates and the hand count. A frame the tracker fails on is
//! delivered as an empty buffer.

use wasm_bindgen::prelude::*;

use crate::error::StartupError;
use crate::tuning::Tuning;

#[wasm_bindgen(inline_js = "
    export async function start_hand_tracking(config_json, draw_landmarks, on_results) {
        const config = JSON.parse(config_json);
        if (typeof Hands === 'undefined' || typeof Camera === 'undefined') {
            throw new Error('MediaPipe Hands did not load');
        }
        const video = document.getElementById('video');
        if (!video) {
            throw new Error('missing #video element');
        }
        const overlay = document.getElementById('overlay');
        const ctx = overlay ? overlay.getContext('2d') : null;

        const hands = new Hands({
            locateFile: (file) => `https://cdn.jsdelivr.net/npm/@mediapipe/hands/${file}`,
        });
        hands.setOptions({
            maxNumHands: config.max_num_hands,
            modelComplexity: config.model_complexity,
            minDetectionConfidence: config.min_detection_confidence,
            minTrackingConfidence: config.min_tracking_confidence,
        });

        hands.onResults((results) => {
            const found = results.multiHandLandmarks || [];
            const flat = new Float32Array(found.length * 63);
            found.forEach((hand, h) => {
                hand.forEach((p, i) => {
                    const o = h * 63 + i * 3;
                    flat[o] = p.x;
                    flat[o + 1] = p.y;
                    flat[o + 2] = p.z;
                });
            });

            if (ctx) {
                if (overlay.width !== video.videoWidth && video.videoWidth > 0) {
                    overlay.width = video.videoWidth;
                    overlay.height = video.videoHeight;
                }
                ctx.clearRect(0, 0, overlay.width, overlay.height);
                if (draw_landmarks && typeof drawConnectors !== 'undefined') {
                    for (const hand of found) {
                        drawConnectors(ctx, hand, HAND_CONNECTIONS, { color: '#00e5ff', lineWidth: 3 });
                        drawLandmarks(ctx, hand, { color: '#ff4081', lineWidth: 1, radius: 3 });
                    }
                }
            }

            on_results(flat, found.length);
        });

        const camera = new Camera(video, {
            onFrame: async () => {
                try {
                    await hands.send({ image: video });
                } catch (e) {
                    console.warn('Hand tracker failed on a frame:', e);
                    on_results(new Float32Array(0), 0);
                }
            },
            width: config.camera_width,
            height: config.camera_height,
        });
        await camera.start();
    }
")]
extern "C" {
    #[wasm_bindgen(catch)]
    async fn start_hand_tracking(
        config_json: &str,
        draw_landmarks: bool,
        on_results: &js_sys::Function,
    ) -> Result<JsValue, JsValue>;
}

/// Start the camera and tracker; `on_frame` receives every processed frame
///
/// Resolves once the camera stream is running. Permission denial and library
/// load failures come back as `StartupError::HandTracking`.
pub async fn start(
    tuning: &Tuning,
    draw_landmarks: bool,
    mut on_frame: impl FnMut(&[f32], usize) + 'static,
) -> Result<(), StartupError> {
    let callback = Closure::<dyn FnMut(js_sys::Float32Array, u32)>::new(
        move |flat: js_sys::Float32Array, hands: u32| {
            on_frame(&flat.to_vec(), hands as usize);
        },
    );

    start_hand_tracking(
        &tuning.tracking_json(),
        draw_landmarks,
        callback.as_ref().unchecked_ref(),
    )
    .await
    .map_err(|e| StartupError::HandTracking(js_error_message(&e)))?;

    // The tracker keeps calling back for the rest of the session
    callback.forget();
    log::info!("Hand tracking started");
    Ok(())
}

fn js_error_message(value: &JsValue) -> String {
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}
