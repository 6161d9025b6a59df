//! Query construction and routing between the curated and filtered
//! search paths.

use rand::Rng;

use crate::types::filters::{FilterCriteria, MediaType};

/// Hand-picked collections known for quality content, keyed by media
/// category. The general index is dominated by low-value uploads, so
/// unfiltered discovery draws from these instead of the whole corpus.
pub const CURATED_COLLECTIONS: &[(&str, &[&str])] = &[
    (
        "image",
        &[
            "flickrcommons",
            "brooklynmuseum",
            "nypl",
            "smithsonian",
            "library_of_congress",
            "nasa",
            "biodiversity",
            "artvee",
            "moma",
            "metropolitanmuseumofart-gallery",
            "rijksmuseum",
        ],
    ),
    (
        "audio",
        &[
            "librivoxaudio",
            "GratefulDead",
            "etree",
            "audio_music",
            "oldtimeradio",
            "opensource_audio",
            "78rpm",
            "audio_bookspoetry",
        ],
    ),
    (
        "movies",
        &[
            "prelinger",
            "classic_tv",
            "feature_films",
            "silent_films",
            "stock_footage",
            "computersandtechvideos",
            "newsandpublicaffairs",
            "animationandcartoons",
            "classic_cartoons",
        ],
    ),
    (
        "texts",
        &[
            "gutenberg",
            "americana",
            "biodiversity",
            "medicalheritagelibrary",
            "iacl",
            "magazine_rack",
            "pulpmagazinearchive",
            "sciencefiction",
        ],
    ),
    (
        "software",
        &[
            "softwarelibrary_msdos_games",
            "softwarelibrary_apple",
            "softwarelibrary_c64",
            "internetarcade",
            "consolelivingroom",
            "softwarelibrary",
        ],
    ),
];

/// Which search path a set of criteria takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryRoute {
    /// The caller expressed intent; build a query from their criteria.
    Filtered,
    /// No explicit intent; sample a curated collection.
    Curated,
}

/// Curated list for a media category, if one exists.
fn curated_for(media_type: &MediaType) -> Option<&'static [&'static str]> {
    let key = match media_type {
        MediaType::Image => "image",
        MediaType::Audio => "audio",
        MediaType::Movies => "movies",
        MediaType::Texts => "texts",
        MediaType::Software => "software",
        _ => return None,
    };
    CURATED_COLLECTIONS
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, collections)| *collections)
}

/// Decide the search path. Explicit user intent (free text, a collection,
/// a year bound) always wins, as does a media type that is itself a
/// collection restriction. Media categories without a curated list fall
/// back to the filtered path too.
pub fn route(criteria: &FilterCriteria) -> QueryRoute {
    if criteria.has_user_filters() || matches!(criteria.media_type, MediaType::Collection(_)) {
        return QueryRoute::Filtered;
    }
    if criteria.media_type == MediaType::All || curated_for(&criteria.media_type).is_some() {
        QueryRoute::Curated
    } else {
        QueryRoute::Filtered
    }
}

/// Build the query for one attempt, routing between the two paths.
/// Curated picks are random, so each attempt may target a different
/// collection.
pub fn build_query(criteria: &FilterCriteria, rng: &mut impl Rng) -> String {
    match route(criteria) {
        QueryRoute::Curated => build_curated_query(criteria, rng),
        QueryRoute::Filtered => build_filtered_query(criteria),
    }
}

/// AND-join clauses for every non-empty criterion. With no criteria at
/// all, fall back to a broad clause requiring a title and at least one
/// download, which keeps totally unranked noise out of the pool.
pub fn build_filtered_query(criteria: &FilterCriteria) -> String {
    let mut parts: Vec<String> = Vec::new();

    match &criteria.media_type {
        MediaType::All => {}
        MediaType::Collection(name) => parts.push(format!("collection:{name}")),
        other => parts.push(format!("mediatype:{other}")),
    }

    if criteria.year_start.is_some() || criteria.year_end.is_some() {
        let start = criteria.year_start.unwrap_or(1800);
        let end = criteria.year_end.unwrap_or(2025);
        parts.push(format!("year:[{start} TO {end}]"));
    }

    if !criteria.language.is_empty() {
        parts.push(format!("language:{}", criteria.language));
    }

    let text = criteria.query.trim();
    if !text.is_empty() {
        parts.push(format!("({text})"));
    }

    let collection = criteria.collection.trim();
    if !collection.is_empty() {
        parts.push(format!("collection:{collection}"));
    }

    if parts.is_empty() {
        parts.push("title:* AND downloads:[1 TO *]".to_string());
    }

    parts.join(" AND ")
}

/// Target one random curated collection. The wildcard media type first
/// picks a random category, then a collection inside it.
pub fn build_curated_query(criteria: &FilterCriteria, rng: &mut impl Rng) -> String {
    let collections = if criteria.media_type == MediaType::All {
        CURATED_COLLECTIONS[rng.gen_range(0..CURATED_COLLECTIONS.len())].1
    } else if let Some(collections) = curated_for(&criteria.media_type) {
        collections
    } else {
        return build_filtered_query(criteria);
    };

    let pick = collections[rng.gen_range(0..collections.len())];
    let mut parts = vec![format!("collection:{pick}")];

    if !criteria.language.is_empty() {
        parts.push(format!("language:{}", criteria.language));
    }

    parts.join(" AND ")
}
