//! CSS-selector fallback over the rendered DOM.
//!
//! Provider markup changes often, so each field has an ordered list of
//! guesses and the first selector with a non-empty result wins.

use scraper::{ElementRef, Html, Selector};
use url::Url;

use super::fields::{clean_image_urls, collapse_whitespace};
use crate::types::listing::ListingDraft;

/// One selector guess. `attr` reads an attribute instead of element text.
#[derive(Debug, Clone, Copy)]
pub struct SelectorSpec {
    pub css: &'static str,
    pub attr: Option<&'static str>,
}

const fn text(css: &'static str) -> SelectorSpec {
    SelectorSpec { css, attr: None }
}

const fn attr(css: &'static str, attr: &'static str) -> SelectorSpec {
    SelectorSpec {
        css,
        attr: Some(attr),
    }
}

pub const ADDRESS_SELECTORS: &[SelectorSpec] = &[
    text(r#"[data-testid="home-details-summary-headline"]"#),
    text(r#"[data-testid="address"]"#),
    text(r#"[itemprop="streetAddress"]"#),
    text(".street-address"),
    text(".property-address"),
    text(".listing-address"),
    text("address"),
    text("h1"),
];

pub const PRICE_SELECTORS: &[SelectorSpec] = &[
    text(r#"[data-testid="price"]"#),
    attr(r#"meta[itemprop="price"]"#, "content"),
    text(r#"[itemprop="price"]"#),
    text(".ds-summary-row .ds-value"),
    text(".listing-price"),
    text(".price"),
];

pub const DESCRIPTION_SELECTORS: &[SelectorSpec] = &[
    text(r#"[data-testid="description"]"#),
    text(r#"[itemprop="description"]"#),
    text(".ds-overview-section"),
    text(".property-description"),
    text(".remarks"),
    text("#description"),
    attr(r#"meta[property="og:description"]"#, "content"),
    attr(r#"meta[name="description"]"#, "content"),
];

/// Each match of the winning selector is one feature.
pub const FEATURE_SELECTORS: &[SelectorSpec] = &[
    text(r#"[data-testid="facts-list"] li"#),
    text(".ds-home-fact-list-item"),
    text(".amenities li"),
    text(".features li"),
    text(".property-features li"),
];

pub const NEIGHBORHOOD_SELECTORS: &[SelectorSpec] = &[
    text(r#"[data-testid="neighborhood"]"#),
    text(".neighborhood-name"),
    text(".neighborhood"),
    text(r#"[itemprop="addressLocality"]"#),
];

/// Each match of the winning selector is one image.
pub const IMAGE_SELECTORS: &[SelectorSpec] = &[
    attr(r#"[data-testid="media-stream"] img"#, "src"),
    attr(".photo-carousel img", "src"),
    attr(".gallery img", "src"),
    attr(r#"img[itemprop="image"]"#, "src"),
    attr(r#"meta[property="og:image"]"#, "content"),
    attr("img[data-src]", "data-src"),
    attr("img[src]", "src"),
];

/// Elements whose text is never visible.
const HIDDEN_ELEMENTS: &[&str] = &["script", "style", "noscript", "template", "head"];

fn value_of(element: ElementRef<'_>, spec: &SelectorSpec) -> Option<String> {
    let raw = match spec.attr {
        Some(name) => element.value().attr(name)?.to_string(),
        None => element.text().collect::<Vec<_>>().join(" "),
    };
    let value = collapse_whitespace(&raw);
    (!value.is_empty()).then_some(value)
}

/// Every non-empty value matched by the first productive selector.
fn first_matching_all(
    document: &Html,
    specs: &[SelectorSpec],
    accept: impl Fn(&[String]) -> bool,
) -> Option<Vec<String>> {
    specs.iter().find_map(|spec| {
        let selector = Selector::parse(spec.css).ok()?;
        let values: Vec<String> = document
            .select(&selector)
            .filter_map(|el| value_of(el, spec))
            .collect();
        accept(values.as_slice()).then_some(values)
    })
}

/// First non-empty value across the ordered selectors.
pub fn first_match(document: &Html, specs: &[SelectorSpec]) -> Option<String> {
    specs.iter().find_map(|spec| {
        let selector = Selector::parse(spec.css).ok()?;
        document
            .select(&selector)
            .find_map(|el| value_of(el, spec))
    })
}

/// Text fields resolved from the DOM. Numeric fields are left to
/// [`super::patterns`].
pub fn selector_fallback(document: &Html, base: &Url) -> ListingDraft {
    let images = first_matching_all(document, IMAGE_SELECTORS, |values| {
        !clean_image_urls(values.iter().cloned(), base).is_empty()
    })
    .map(|values| clean_image_urls(values, base));

    ListingDraft {
        address: first_match(document, ADDRESS_SELECTORS),
        price: first_match(document, PRICE_SELECTORS),
        description: first_match(document, DESCRIPTION_SELECTORS),
        features: first_matching_all(document, FEATURE_SELECTORS, |values| !values.is_empty()),
        neighborhood: first_match(document, NEIGHBORHOOD_SELECTORS),
        images,
        ..Default::default()
    }
}

/// Visible page text, whitespace-collapsed.
pub fn page_text(document: &Html) -> String {
    let parts: Vec<&str> = document
        .root_element()
        .descendants()
        .filter_map(|node| {
            let text = node.value().as_text()?;
            let hidden = node.ancestors().any(|ancestor| {
                ancestor
                    .value()
                    .as_element()
                    .is_some_and(|el| HIDDEN_ELEMENTS.contains(&el.name()))
            });
            (!hidden).then_some(&**text)
        })
        .collect();
    collapse_whitespace(&parts.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://homes.example.org/listing/42").unwrap()
    }

    #[test]
    fn test_ordered_guesses() {
        let html = r#"
            <html><body>
              <h1>Welcome</h1>
              <div class="property-address">  77 Birch
                  Lane </div>
              <span class="price">$389,900</span>
              <meta itemprop="price" content="$390,000">
            </body></html>"#;
        let document = Html::parse_document(html);
        let draft = selector_fallback(&document, &base());

        assert_eq!(draft.address.as_deref(), Some("77 Birch Lane"));
        assert_eq!(draft.price.as_deref(), Some("$390,000"));
        assert_eq!(draft.bedrooms, None);
    }

    #[test]
    fn test_features_and_neighborhood() {
        let html = r#"
            <ul class="features"><li>Hardwood floors</li><li> </li><li>Fireplace</li></ul>
            <span class="neighborhood">Old Town</span>"#;
        let document = Html::parse_document(html);
        let draft = selector_fallback(&document, &base());

        assert_eq!(
            draft.features,
            Some(vec!["Hardwood floors".to_string(), "Fireplace".to_string()])
        );
        assert_eq!(draft.neighborhood.as_deref(), Some("Old Town"));
    }

    #[test]
    fn test_images_skip_placeholder_only_selectors() {
        let html = r#"
            <div class="gallery"><img src="/img/placeholder.png"></div>
            <meta property="og:image" content="https://cdn.example.org/front.jpg">
            <img src="/photos/2.jpg"><img src="/photos/2.jpg">"#;
        let document = Html::parse_document(html);
        let draft = selector_fallback(&document, &base());

        assert_eq!(
            draft.images,
            Some(vec!["https://cdn.example.org/front.jpg".to_string()])
        );
    }

    #[test]
    fn test_page_text_excludes_scripts_and_styles() {
        let html = r#"
            <html><head><title>T</title><style>.a{}</style></head>
            <body><p>3 beds</p><script>var beds = 9;</script><noscript>7 beds</noscript>
            <div>1,200  sq ft</div></body></html>"#;
        let document = Html::parse_document(html);

        assert_eq!(page_text(&document), "3 beds 1,200 sq ft");
    }

    #[test]
    fn test_empty_document() {
        let document = Html::parse_document("");
        let draft = selector_fallback(&document, &base());
        assert_eq!(draft, ListingDraft::default());
        assert_eq!(page_text(&document), "");
    }
}
