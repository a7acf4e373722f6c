use geojson::JsonObject;
use serde_json::{json, Value};

use std::fmt::Display;

// RFC 7946 coordinates are WGS 84 unless a crs member says otherwise
const DEFAULT_EPSG: u32 = 4326;

/// Coordinate reference system of a feature collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Crs {
    /// Any EPSG style authority code, not only those in the bundled database
    Epsg(u32),
    Named(String),
}

impl Crs {
    /// Reads the (2008 GeoJSON) `crs` member from the foreign members of a collection.
    /// Both the `name` and the `EPSG` flavour are understood
    pub fn from_foreign_members(members: Option<&JsonObject>) -> Crs {
        let Some(crs) = members.and_then(|m| m.get("crs")) else {
            return Crs::Epsg(DEFAULT_EPSG);
        };
        let properties = crs.get("properties");

        if let Some(code) = properties
            .and_then(|p| p.get("code"))
            .and_then(Value::as_u64)
            .and_then(|c| u32::try_from(c).ok())
        {
            return Crs::Epsg(code);
        }

        match properties.and_then(|p| p.get("name")).and_then(Value::as_str) {
            Some(name) => Crs::parse(name),
            None => Crs::Epsg(DEFAULT_EPSG),
        }
    }

    /// Accepts `EPSG:n`, `urn:ogc:def:crs:EPSG::n` and the OGC CRS84 urn,
    /// everything else is kept as a named crs and only compared verbatim
    pub fn parse(name: &str) -> Crs {
        let name = name.trim();
        let upper = name.to_ascii_uppercase();

        if upper.ends_with(":CRS84") || upper == "CRS84" {
            return Crs::Epsg(DEFAULT_EPSG);
        }

        if upper.starts_with("EPSG:") || upper.starts_with("URN:OGC:DEF:CRS:EPSG:") {
            if let Some(code) = upper.rsplit(':').next().and_then(|c| c.parse().ok()) {
                return Crs::Epsg(code);
            }
        }
        Crs::Named(name.to_string())
    }

    pub fn to_foreign_members(&self) -> JsonObject {
        let name = match self {
            Crs::Epsg(code) => format!("urn:ogc:def:crs:EPSG::{code}"),
            Crs::Named(name) => name.clone(),
        };

        let mut members = JsonObject::new();
        members.insert(
            "crs".to_string(),
            json!({ "type": "name", "properties": { "name": name } }),
        );
        members
    }

    /// Name of the crs as registered in the EPSG database, if known
    pub fn description(&self) -> Option<&'static str> {
        let Crs::Epsg(code) = self else {
            return None;
        };
        let definition = crs_definitions::from_code(u16::try_from(*code).ok()?)?;
        definition.wkt.split('"').nth(1)
    }

    /// Areas in a geographic crs are in square degrees, not useful as lengths
    pub fn is_geographic(&self) -> bool {
        match self {
            Crs::Epsg(code) => u16::try_from(*code)
                .ok()
                .and_then(crs_definitions::from_code)
                .is_some_and(|d| d.proj4.contains("+proj=longlat")),
            Crs::Named(_) => false,
        }
    }
}

impl Display for Crs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Crs::Epsg(code) => write!(f, "EPSG:{code}"),
            Crs::Named(name) => f.write_str(name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn members(crs: Value) -> JsonObject {
        let mut members = JsonObject::new();
        members.insert("crs".to_string(), crs);
        members
    }

    #[test]
    fn test_parse_crs_names() {
        assert_eq!(Crs::parse("EPSG:32627"), Crs::Epsg(32627));
        assert_eq!(Crs::parse("epsg:3057"), Crs::Epsg(3057));
        assert_eq!(Crs::parse("urn:ogc:def:crs:EPSG::32627"), Crs::Epsg(32627));
        assert_eq!(Crs::parse("urn:ogc:def:crs:OGC:1.3:CRS84"), Crs::Epsg(4326));
        assert_eq!(
            Crs::parse("ESRI:102100"),
            Crs::Named("ESRI:102100".to_string())
        );
    }

    #[test]
    fn test_missing_crs_member_is_wgs84() {
        assert_eq!(Crs::from_foreign_members(None), Crs::Epsg(4326));
        assert_eq!(
            Crs::from_foreign_members(Some(&JsonObject::new())),
            Crs::Epsg(4326)
        );
    }

    #[test]
    fn test_crs_member_flavours() {
        let named = members(json!({
            "type": "name",
            "properties": { "name": "urn:ogc:def:crs:EPSG::3057" }
        }));
        let linked = members(json!({
            "type": "EPSG",
            "properties": { "code": 3057 }
        }));

        assert_eq!(Crs::from_foreign_members(Some(&named)), Crs::Epsg(3057));
        assert_eq!(
            Crs::from_foreign_members(Some(&named)),
            Crs::from_foreign_members(Some(&linked))
        );
    }

    #[test]
    fn test_crs_member_written_back() {
        let crs = Crs::Epsg(32627);
        let written = crs.to_foreign_members();

        assert_eq!(Crs::from_foreign_members(Some(&written)), crs);
    }

    #[test]
    fn test_large_codes_compare_by_number() {
        assert_eq!(Crs::parse("EPSG:102100"), Crs::Epsg(102100));
        assert_eq!(
            Crs::parse("urn:ogc:def:crs:EPSG::102100"),
            Crs::parse("EPSG:102100")
        );
        assert_eq!(Crs::Epsg(102100).description(), None);
        assert!(!Crs::Epsg(102100).is_geographic());
    }

    #[test]
    fn test_description_from_database() {
        assert_eq!(Crs::Epsg(4326).description(), Some("WGS 84"));
        assert_eq!(Crs::Named("local".to_string()).description(), None);
    }

    #[test]
    fn test_geographic_crs() {
        assert!(Crs::Epsg(4326).is_geographic());
        assert!(!Crs::Epsg(32627).is_geographic());
        assert!(!Crs::Named("local".to_string()).is_geographic());
    }
}
