//! `Metadata/slice_info.config` manifest mapping
//!
//! The manifest lists, per plate, a handful of `<metadata key=".." value=".."/>`
//! pairs plus the objects and filaments the plate uses:
//!
//! ```xml
//! <config>
//!   <plate>
//!     <metadata key="index" value="1"/>
//!     <metadata key="printer_model_id" value="C12"/>
//!     <metadata key="support_used" value="false"/>
//!     <object identify_id="96" name="Cube.stl" skipped="false"/>
//!     <filament id="1" type="PLA" color="#FFFFFF" used_m="1.23" used_g="3.67"/>
//!   </plate>
//! </config>
//! ```

use crate::error::{Error, Result};
use crate::model::FilamentInfo;
use quick_xml::Reader;
use quick_xml::escape::unescape;
use quick_xml::events::{BytesStart, Event};
use std::collections::{HashMap, HashSet};

/// Default buffer capacity for XML parsing (4KB)
const XML_BUFFER_CAPACITY: usize = 4096;

/// Values read from one `<plate>` element, as written in the manifest
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct PlateInfo {
    pub index: Option<String>,
    pub printer_model_id: Option<String>,
    pub support_used: Option<String>,
    pub file_names: Vec<String>,
    pub filaments: Vec<FilamentInfo>,
    /// Metadata keys already taken, whether or not they carried a value
    pub(super) seen_keys: HashSet<&'static str>,
}

impl PlateInfo {
    /// Whether this plate's `index` metadata names plate `plate`
    pub fn has_index(&self, plate: u32) -> bool {
        self.index
            .as_deref()
            .and_then(|index| index.trim().parse::<u32>().ok())
            == Some(plate)
    }

    fn apply_metadata(&mut self, attrs: &HashMap<String, String>) {
        let Some(key) = attrs.get("key") else {
            return;
        };
        let (key, slot) = match key.as_str() {
            "index" => ("index", &mut self.index),
            "printer_model_id" => ("printer_model_id", &mut self.printer_model_id),
            "support_used" => ("support_used", &mut self.support_used),
            _ => return,
        };
        // First matching element wins, even without a value
        if self.seen_keys.insert(key) {
            *slot = attrs.get("value").cloned();
        }
    }
}

/// Read every direct `<plate>` child of the `<config>` root
///
/// Fails if the XML is malformed, the root is not `<config>`, or it has no
/// `<plate>` child.
pub(crate) fn parse_slice_info(xml: &str) -> Result<Vec<PlateInfo>> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);
    let mut buf = Vec::with_capacity(XML_BUFFER_CAPACITY);

    let mut depth = 0usize;
    let mut saw_root = false;
    let mut plates = Vec::new();
    let mut current: Option<PlateInfo> = None;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                visit_element(e, depth, &mut saw_root, &mut current, &mut plates, false)?;
                depth += 1;
            }
            Ok(Event::Empty(ref e)) => {
                visit_element(e, depth, &mut saw_root, &mut current, &mut plates, true)?;
            }
            Ok(Event::End(_)) => {
                depth = depth.saturating_sub(1);
                if depth == 1
                    && let Some(plate) = current.take()
                {
                    plates.push(plate);
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    if !saw_root {
        return Err(Error::invalid_xml_element("config", "root element not found"));
    }
    if plates.is_empty() {
        return Err(Error::invalid_xml_element(
            "plate",
            "not found in slice_info.config",
        ));
    }
    Ok(plates)
}

fn visit_element(
    e: &BytesStart,
    depth: usize,
    saw_root: &mut bool,
    current: &mut Option<PlateInfo>,
    plates: &mut Vec<PlateInfo>,
    is_empty: bool,
) -> Result<()> {
    let name = e.name();
    let name_str =
        std::str::from_utf8(name.as_ref()).map_err(|e| Error::InvalidXml(e.to_string()))?;

    match depth {
        0 => {
            if name_str != "config" {
                return Err(Error::invalid_xml_element(
                    name_str,
                    "expected <config> as the manifest root",
                ));
            }
            *saw_root = true;
        }
        1 if name_str == "plate" => {
            if is_empty {
                plates.push(PlateInfo::default());
            } else {
                *current = Some(PlateInfo::default());
            }
        }
        2 => {
            let Some(plate) = current.as_mut() else {
                return Ok(());
            };
            match name_str {
                "metadata" => plate.apply_metadata(&parse_attributes(e)?),
                "object" => {
                    let attrs = parse_attributes(e)?;
                    if let Some(file_name) = attrs.get("name").filter(|n| !n.is_empty()) {
                        plate.file_names.push(file_name.clone());
                    }
                }
                "filament" => {
                    let mut attrs = parse_attributes(e)?;
                    plate.filaments.push(FilamentInfo {
                        id: attrs.remove("id"),
                        material_type: attrs.remove("type"),
                        color: attrs.remove("color"),
                        used_m: attrs.remove("used_m"),
                        used_g: attrs.remove("used_g"),
                    });
                }
                _ => {}
            }
        }
        _ => {}
    }
    Ok(())
}

/// Collect an element's attributes, unescaping their values
fn parse_attributes(e: &BytesStart) -> Result<HashMap<String, String>> {
    let mut attrs = HashMap::with_capacity(8);

    for attr in e.attributes() {
        let attr = attr?;
        let key =
            std::str::from_utf8(attr.key.as_ref()).map_err(|e| Error::InvalidXml(e.to_string()))?;
        let raw =
            std::str::from_utf8(&attr.value).map_err(|e| Error::InvalidXml(e.to_string()))?;
        let value = unescape(raw).map_err(|e| Error::XmlAttr(e.to_string()))?;

        attrs.insert(key.to_string(), value.into_owned());
    }

    Ok(attrs)
}

/// Parse a manifest boolean (`true` / `false`, any case)
pub(crate) fn parse_bool(field: &str, value: &str) -> Result<bool> {
    let value = value.trim();
    if value.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if value.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(Error::parse_error_with_context(field, value, "boolean"))
    }
}
