//! Plain-text rendering of the feed for terminals.
use listing_api::{AlertKind, DiscoverState, ImageSource, Listing};

pub fn render_state(state: &DiscoverState) -> String {
    let mut out = String::new();

    if let Some(alert) = &state.alert {
        out.push_str(&render_alert(alert));
        out.push('\n');
    }

    if state.listings.is_empty() {
        out.push_str("No listings\n");
    }

    for listing in &state.listings {
        out.push_str(&render_listing(listing));
        out.push('\n');
    }

    out
}

fn render_alert(alert: &AlertKind) -> String {
    format!("[{}] {}", alert.title(), alert.message().replace('\n', " | "))
}

pub fn render_listing(listing: &Listing) -> String {
    let image = match listing.primary_image() {
        Some(ImageSource::Remote(url)) => url.to_string(),
        Some(ImageSource::Bundled(name)) => format!("bundled:{name}"),
        None => "placeholder".to_string(),
    };

    let price = if listing.is_classified {
        format!("{} (Buy Now)", listing.display_price())
    } else {
        let mut price = listing.display_price().to_string();
        if let Some(label) = listing.reserve_label().filter(|l| !l.is_empty()) {
            price.push_str(&format!(" ({label})"));
        }
        if let Some(buy_now) = listing.buy_now_label() {
            price.push_str(&format!(" | {buy_now} (Buy Now)"));
        }
        price
    };

    format!(
        "{} - {} | {} | {}",
        listing.display_region(),
        listing.display_title(),
        price,
        image
    )
}
