use axum::Json;
use axum::http::{HeaderName, header};
use axum::response::IntoResponse;
use rand::seq::SliceRandom;
use serde::Serialize;

/// Sample descriptions offered to users who do not know what to type
pub const EXAMPLE_DESCRIPTIONS: &[&str] = &[
    "A small, round fruit with red skin and white flesh that grows on trees and is often associated with Snow White",
    "A tall African animal with a very long neck and spotted coat pattern",
    "A hot beverage made from roasted and ground beans, often consumed in the morning",
    "A musical instrument with black and white keys that you play with your fingers",
    "A flying insect with colorful wings that transforms from a caterpillar",
    "A large sea mammal that spouts water and is known for its songs",
    "A round object that bounces and is used in many sports",
    "A device that tells time by moving hands around a numbered circle",
    "A piece of furniture you sleep on at night with pillows and blankets",
    "A tall green plant that provides shade and oxygen, with branches and leaves",
    "A small electronic device you use to change channels on a TV",
    "A sweet frozen treat on a stick that you eat in summer to cool down",
    "A writing tool that uses ink and has replaced the quill",
    "A bag you carry on your back to hold books and supplies",
    "A device that makes bread brown and crispy for breakfast",
];

#[derive(Debug, Serialize)]
pub struct SuggestResponse {
    pub description: &'static str,
}

/// A random example description, never cached
pub async fn suggest() -> impl IntoResponse {
    let description = EXAMPLE_DESCRIPTIONS
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or_default();

    (
        [
            (
                header::CACHE_CONTROL,
                "no-store, no-cache, must-revalidate, proxy-revalidate",
            ),
            (header::PRAGMA, "no-cache"),
            (header::EXPIRES, "0"),
            (HeaderName::from_static("surrogate-control"), "no-store"),
        ],
        Json(SuggestResponse { description }),
    )
}
