use std::fmt::Write;

use crate::{
    model::{ArtistView, RecommendationView, TrackView},
    search::{SearchQuery, SearchResponse},
    utils::{escape_html, format_duration},
};

const HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>trackscope</title>
</head>
<body>
"#;

const TAIL: &str = "</body>\n</html>\n";

/// Renders the single page of the front end: the search form followed by
/// either an error message or the lookup result.
pub fn render_page(query: Option<&SearchQuery>, response: Option<&SearchResponse>) -> String {
    let mut html = String::from(HEAD);
    render_form(&mut html, query);

    match response {
        Some(SearchResponse::Found(result)) => {
            render_track(&mut html, &result.track);
            render_artists(&mut html, &result.artists);
            render_recommendations(&mut html, &result.recommendations);
        }
        Some(SearchResponse::Failed(failure)) => {
            let _ = writeln!(
                html,
                "<p class=\"error\">{}</p>",
                escape_html(failure.message())
            );
        }
        None => {}
    }

    html.push_str(TAIL);
    html
}

fn render_form(html: &mut String, query: Option<&SearchQuery>) {
    let (artist, track) = query
        .map(|q| (q.artist.as_str(), q.track.as_str()))
        .unwrap_or_default();
    let _ = writeln!(
        html,
        "<form method=\"post\" action=\"/search\">\n\
         <input name=\"artist\" placeholder=\"Artist\" value=\"{}\">\n\
         <input name=\"track\" placeholder=\"Track\" value=\"{}\">\n\
         <button type=\"submit\">Search</button>\n\
         </form>",
        escape_html(artist),
        escape_html(track)
    );
}

fn render_track(html: &mut String, track: &TrackView) {
    let _ = writeln!(
        html,
        "<section class=\"track\">\n\
         <img src=\"{img}\" alt=\"\">\n\
         <h1>{name}{explicit}</h1>\n\
         <p>{album} · {duration} · popularity {popularity}</p>\n\
         <pre class=\"lyrics\">{lyrics}</pre>\n\
         </section>",
        img = escape_html(&track.img_src),
        name = escape_html(&track.name),
        explicit = if track.explicit { " <small>E</small>" } else { "" },
        album = escape_html(&track.album),
        duration = format_duration(track.minute, &track.second),
        popularity = track.popularity,
        lyrics = escape_html(&track.lyrics),
    );
}

fn render_artists(html: &mut String, artists: &[ArtistView]) {
    if artists.is_empty() {
        return;
    }
    html.push_str("<section class=\"artists\">\n<h2>Artists</h2>\n<ul>\n");
    for artist in artists {
        let _ = writeln!(
            html,
            "<li><img src=\"{}\" alt=\"\"> {} · popularity {} · {}</li>",
            escape_html(&artist.img_src),
            escape_html(&artist.name),
            artist.popularity,
            escape_html(&artist.genres.join(", ")),
        );
    }
    html.push_str("</ul>\n</section>\n");
}

fn render_recommendations(html: &mut String, recommendations: &[RecommendationView]) {
    if recommendations.is_empty() {
        return;
    }
    html.push_str("<section class=\"recommendations\">\n<h2>Recommendations</h2>\n<ul>\n");
    for rec in recommendations {
        let _ = writeln!(
            html,
            "<li><img src=\"{}\" alt=\"\"> <a href=\"{}\">{}</a> by {} · {}{}</li>",
            escape_html(&rec.img_src),
            escape_html(&rec.url),
            escape_html(&rec.name),
            escape_html(&rec.artists.join(", ")),
            format_duration(rec.minute, &rec.second),
            if rec.explicit { " <small>E</small>" } else { "" },
        );
    }
    html.push_str("</ul>\n</section>\n");
}
