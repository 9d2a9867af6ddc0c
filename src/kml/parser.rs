use super::KmlError;
use crate::domain::Placemark;
use log::debug;
use roxmltree::{Document, Node};

const STYLE_PREFIX: &str = "#placemark-";

/// Extract one `Placemark` per `Document` -> `Placemark` element, in document
/// order.
///
/// # Per placemark
/// 1. Default `<name>` text, overridden by the English extended-data name
///    when one exists and differs
/// 2. `<TimeStamp><when>` verbatim
/// 3. `<styleUrl>` minus the `#placemark-` prefix
/// 4. `<Point><coordinates>` split into exactly two floats (longitude first)
/// 5. Feature-type tags joined with `;`, icon text or empty
///
/// Any missing required element aborts extraction for the whole file.
pub fn extract_placemarks(doc: &Document) -> Result<Vec<Placemark>, KmlError> {
    let placemarks = doc
        .descendants()
        .filter(|n| n.is_element() && n.tag_name().name() == "Placemark")
        .filter(|n| {
            n.ancestors()
                .any(|a| a.is_element() && a.tag_name().name() == "Document")
        });

    let mut rows = Vec::new();
    for (index, placemark) in placemarks.enumerate() {
        rows.push(extract_one(placemark, index)?);
    }
    Ok(rows)
}

fn extract_one(placemark: Node, index: usize) -> Result<Placemark, KmlError> {
    let mut name = required_text(placemark, "name", index)?.to_string();

    let timestamp_block = element(placemark, "TimeStamp")
        .ok_or(KmlError::MissingElement { index, tag: "TimeStamp" })?;
    let timestamp = required_text(timestamp_block, "when", index)?.to_string();

    let style = required_text(placemark, "styleUrl", index)?;
    let color = style.strip_prefix(STYLE_PREFIX).unwrap_or(style).to_string();

    let point = element(placemark, "Point")
        .ok_or(KmlError::MissingElement { index, tag: "Point" })?;
    let coords_text = required_text(point, "coordinates", index)?;
    let (coords_long, coords_lat) =
        parse_coords(coords_text).ok_or_else(|| KmlError::InvalidCoordinates {
            index,
            text: coords_text.to_string(),
        })?;

    let mut category = String::new();
    let mut icon = String::new();
    if let Some(extended) = element(placemark, "ExtendedData") {
        if let Some(en) = english_name(extended)
            && en != name
        {
            debug!("placemark {index}: English name {en:?} overrides {name:?}");
            name = en.to_string();
        }

        let tags: Vec<&str> = extended
            .descendants()
            .filter(|n| n.is_element() && n.tag_name().name() == "mwm_featureTypes")
            .flat_map(|ft| ft.children().filter(|c| c.is_element()))
            .filter_map(|c| c.text())
            .collect();
        category = tags.join(";");

        icon = element_text(extended, "mwm_icon")
            .unwrap_or_default()
            .to_string();
    }

    Ok(Placemark {
        name,
        timestamp,
        color,
        coords_long,
        coords_lat,
        category,
        icon,
    })
}

/// The English entry of the extended-data language block, if any.
fn english_name<'a>(extended: Node<'a, '_>) -> Option<&'a str> {
    let name_block = element(extended, "mwm_name")?;
    name_block
        .descendants()
        .find(|n| {
            n.is_element()
                && n.tag_name().name() == "mwm_lang"
                && n.attribute("code") == Some("en")
        })
        .and_then(|n| n.text())
}

/// Coordinates text must split on `,` into exactly two float tokens,
/// longitude first per the KML ordering.
fn parse_coords(text: &str) -> Option<(f64, f64)> {
    let mut parts = text.split(',');
    let long: f64 = parts.next()?.trim().parse().ok()?;
    let lat: f64 = parts.next()?.trim().parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some((long, lat))
}

fn element<'a, 'd>(scope: Node<'a, 'd>, tag: &str) -> Option<Node<'a, 'd>> {
    scope
        .descendants()
        .find(|n| n.is_element() && n.tag_name().name() == tag)
}

fn element_text<'a>(scope: Node<'a, '_>, tag: &str) -> Option<&'a str> {
    element(scope, tag).and_then(|n| n.text())
}

fn required_text<'a>(
    scope: Node<'a, '_>,
    tag: &'static str,
    index: usize,
) -> Result<&'a str, KmlError> {
    element_text(scope, tag).ok_or(KmlError::MissingElement { index, tag })
}
