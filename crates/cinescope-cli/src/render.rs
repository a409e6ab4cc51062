//! Log-based rendering of catalog data.

use cinescope_api::tmdb::{
    DEFAULT_IMAGE_SIZE, MovieItem, SearchResponse, TmdbPage, TmdbProvider, TmdbTvDetails,
    TmdbTvSeason, TmdbWatchProviders, TvItem, image_url,
};

/// Logs one movie row.
fn movie_row(movie: &MovieItem) {
    tracing::info!(
        "{}\t{}\t{}\t{:.1}\t{}",
        movie.id,
        movie.title,
        movie.release_date.as_deref().unwrap_or("-"),
        movie.vote_average,
        image_url(movie.poster_path.as_deref(), DEFAULT_IMAGE_SIZE),
    );
}

/// Logs one TV row.
fn tv_row(tv: &TvItem) {
    tracing::info!(
        "{}\t{}\t{}\t{:.1}\t{}",
        tv.id,
        tv.name,
        tv.first_air_date.as_deref().unwrap_or("-"),
        tv.vote_average,
        image_url(tv.poster_path.as_deref(), DEFAULT_IMAGE_SIZE),
    );
}

/// Logs a partitioned search response.
///
/// A warning precedes the listing when the built-in catalog was served.
pub fn search_response(response: &SearchResponse) {
    if response.is_degraded() {
        tracing::warn!("Live search unavailable, showing the built-in catalog");
    }

    tracing::info!("Movies: {}", response.movies.len());
    for movie in &response.movies {
        movie_row(movie);
    }

    tracing::info!("TV series: {}", response.tv_shows.len());
    for tv in &response.tv_shows {
        tv_row(tv);
    }

    if !response.people.is_empty() {
        tracing::info!("People: {}", response.people.len());
        for person in &response.people {
            tracing::info!(
                "{}\t{}\t{}",
                person.id,
                person.name,
                person.known_for_department.as_deref().unwrap_or("-"),
            );
        }
    }

    tracing::info!("Source: {}", response.source.as_str());
}

/// Logs a page of movies.
pub fn movie_page(page: &TmdbPage<MovieItem>) {
    tracing::info!(
        "Page {}/{} ({} results)",
        page.page,
        page.total_pages,
        page.total_results
    );
    for movie in &page.results {
        movie_row(movie);
    }
}

/// Logs a page of TV series.
pub fn tv_page(page: &TmdbPage<TvItem>) {
    tracing::info!(
        "Page {}/{} ({} results)",
        page.page,
        page.total_pages,
        page.total_results
    );
    for tv in &page.results {
        tv_row(tv);
    }
}

/// Logs TV series details and its season list.
pub fn tv_details(details: &TmdbTvDetails) {
    tracing::info!("{}\t{}", details.id, details.name);
    if let Some(tagline) = details.tagline.as_deref().filter(|t| !t.is_empty()) {
        tracing::info!("{}", tagline);
    }
    tracing::info!(
        "Status: {}\tSeasons: {}\tEpisodes: {}\tRating: {:.1}",
        details.status.as_deref().unwrap_or("-"),
        details.number_of_seasons,
        details.number_of_episodes,
        details.vote_average,
    );
    let genres: Vec<&str> = details.genres.iter().map(|g| g.name.as_str()).collect();
    tracing::info!("Genres: {}", genres.join(", "));
    tracing::info!(
        "Poster: {}",
        image_url(details.poster_path.as_deref(), DEFAULT_IMAGE_SIZE)
    );
    tracing::info!("Season\tEpisodes\tAirDate\t\tName");
    for season in &details.seasons {
        tracing::info!(
            "{}\t{}\t\t{}\t{}",
            season.season_number,
            season.episode_count,
            season.air_date.as_deref().unwrap_or("-"),
            season.name,
        );
    }
}

/// Logs a season's episode list.
pub fn tv_season(season: &TmdbTvSeason) {
    tracing::info!(
        "Season {}: {}",
        season.season_number,
        season.name.as_deref().unwrap_or("-")
    );
    tracing::info!("Ep\tAirDate\t\tRuntime\tName");
    for episode in &season.episodes {
        tracing::info!(
            "{}\t{}\t{}\t{}",
            episode.episode_number,
            episode.air_date.as_deref().unwrap_or("-"),
            episode
                .runtime
                .map_or_else(|| String::from("-"), |r| format!("{r}m")),
            episode.name,
        );
    }
}

/// Joins provider names in display-priority order.
fn provider_names(providers: &[TmdbProvider]) -> String {
    let mut sorted: Vec<&TmdbProvider> = providers.iter().collect();
    sorted.sort_by_key(|p| p.display_priority);
    let names: Vec<&str> = sorted.iter().map(|p| p.provider_name.as_str()).collect();
    if names.is_empty() {
        String::from("-")
    } else {
        names.join(", ")
    }
}

/// Logs the providers of one region.
pub fn watch_providers(providers: &TmdbWatchProviders, region: &str) {
    let Some(entry) = providers.results.get(region) else {
        tracing::info!("No providers for region {}", region);
        return;
    };
    tracing::info!("Stream: {}", provider_names(&entry.flatrate));
    tracing::info!("Rent: {}", provider_names(&entry.rent));
    tracing::info!("Buy: {}", provider_names(&entry.buy));
    if let Some(link) = &entry.link {
        tracing::info!("Link: {}", link);
    }
}
