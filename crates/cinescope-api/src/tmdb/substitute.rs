//! Built-in catalog served when no live source answers a search.

use super::types::{MovieItem, TvItem};

/// Builds a movie entry of the substitute catalog.
fn movie(
    id: u64,
    title: &str,
    release_date: &str,
    vote_average: f64,
    poster_path: &str,
    overview: &str,
) -> MovieItem {
    MovieItem {
        id,
        title: String::from(title),
        original_title: Some(String::from(title)),
        overview: Some(String::from(overview)),
        poster_path: Some(String::from(poster_path)),
        release_date: Some(String::from(release_date)),
        vote_average,
        ..MovieItem::default()
    }
}

/// Builds a TV entry of the substitute catalog.
fn tv(
    id: u64,
    name: &str,
    first_air_date: &str,
    vote_average: f64,
    poster_path: &str,
    overview: &str,
) -> TvItem {
    TvItem {
        id,
        name: String::from(name),
        original_name: Some(String::from(name)),
        overview: Some(String::from(overview)),
        poster_path: Some(String::from(poster_path)),
        first_air_date: Some(String::from(first_air_date)),
        vote_average,
        ..TvItem::default()
    }
}

/// Substitute movies, in display order.
#[must_use]
pub fn movies() -> Vec<MovieItem> {
    vec![
        movie(
            693_134,
            "Dune - Parte due",
            "2024-02-27",
            8.2,
            "/1pdfLvkbY9ohJlCjQH2CZjjYVvJ.jpg",
            "Paul Atreides si unisce a Chani e ai Fremen in cerca di vendetta.",
        ),
        movie(
            872_585,
            "Oppenheimer",
            "2023-07-19",
            8.1,
            "/8Gxv8gSFCU0XGDykEGv7zR1n2ua.jpg",
            "La storia del fisico J. Robert Oppenheimer e della bomba atomica.",
        ),
        movie(
            157_336,
            "Interstellar",
            "2014-11-05",
            8.4,
            "/gEU2QniE6E77NI6lCU6MxlNBvIx.jpg",
            "Un gruppo di esploratori viaggia attraverso un wormhole nello spazio.",
        ),
        movie(
            155,
            "Il cavaliere oscuro",
            "2008-07-16",
            8.5,
            "/qJ2tW6WMUDux911r6m7haRef0WH.jpg",
            "Batman affronta il Joker, un criminale che semina il caos a Gotham.",
        ),
    ]
}

/// Substitute TV series, in display order.
#[must_use]
pub fn tv_shows() -> Vec<TvItem> {
    vec![
        tv(
            106_379,
            "Fallout",
            "2024-04-10",
            8.3,
            "/c15BtJxCXMrISLVmysdsnZUPQft.jpg",
            "Duecento anni dopo l'apocalisse, gli abitanti dei rifugi tornano in superficie.",
        ),
        tv(
            136_315,
            "The Bear",
            "2022-06-23",
            8.2,
            "/sHFlbKS3WLqMnp9t2ghADIJFnuQ.jpg",
            "Un giovane chef torna a Chicago per gestire la paninoteca di famiglia.",
        ),
        tv(
            126_308,
            "Shōgun",
            "2024-02-27",
            8.6,
            "/7O4iVfOMQmdCSxhOg1WnzG1AgYT.jpg",
            "Nel Giappone del 1600 Lord Toranaga lotta per la sopravvivenza.",
        ),
        tv(
            1396,
            "Breaking Bad",
            "2008-01-20",
            8.9,
            "/ztkUQFLlC19CCMYHW9o1zWhJRNq.jpg",
            "Un professore di chimica malato di cancro inizia a produrre metanfetamina.",
        ),
    ]
}
