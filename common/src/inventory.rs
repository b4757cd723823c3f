//! # Inventory Model
//!
//! A [`Row`] is the flattened record every collector produces, one per asset.
//! Fields a collector has nothing to say about stay at their zero value.

use serde::{Serialize, Serializer};

pub mod csv;

/// Column headings, in the order [`Row`] serializes its fields.
pub const HEADERS: [&str; 23] = [
    "Unique Asset Identifier",
    "IPv4 or IPv6 Address",
    "Virtual",
    "Public",
    "DNS Name or URL",
    "NetBIOS Name",
    "MAC Address",
    "Authenticated Scan",
    "Baseline Configuration Name",
    "OS Name and Version",
    "Location",
    "Asset Type",
    "Hardware Make/Model",
    "In Latest Scan",
    "Software/Database Vendor",
    "Software/Database Name & Version",
    "Patch Level",
    "Function",
    "Comments",
    "Serial #/Asset Tag #",
    "VLAN/Network ID",
    "System Administrator/Owner",
    "Application Administrator/Owner",
];

/// A single asset in the report.
///
/// Multi-valued fields (addresses, DNS names, MAC addresses) hold their values
/// joined by `\n`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Row {
    #[serde(rename = "Unique Asset Identifier")]
    pub unique_asset_identifier: String,
    #[serde(rename = "IPv4 or IPv6 Address")]
    pub ip_address: String,
    #[serde(rename = "Virtual", serialize_with = "yes_no")]
    pub is_virtual: bool,
    #[serde(rename = "Public", serialize_with = "yes_no")]
    pub is_public: bool,
    #[serde(rename = "DNS Name or URL")]
    pub dns_name_or_url: String,
    #[serde(rename = "NetBIOS Name")]
    pub netbios_name: String,
    #[serde(rename = "MAC Address")]
    pub mac_address: String,
    #[serde(rename = "Authenticated Scan", serialize_with = "yes_no")]
    pub authenticated_scan: bool,
    #[serde(rename = "Baseline Configuration Name")]
    pub baseline_configuration_name: String,
    #[serde(rename = "OS Name and Version")]
    pub os_name_and_version: String,
    #[serde(rename = "Location")]
    pub location: String,
    #[serde(rename = "Asset Type")]
    pub asset_type: String,
    #[serde(rename = "Hardware Make/Model")]
    pub hardware_make_model: String,
    #[serde(rename = "In Latest Scan", serialize_with = "yes_no")]
    pub in_latest_scan: bool,
    #[serde(rename = "Software/Database Vendor")]
    pub software_database_vendor: String,
    #[serde(rename = "Software/Database Name & Version")]
    pub software_database_name_and_version: String,
    #[serde(rename = "Patch Level")]
    pub patch_level: String,
    #[serde(rename = "Function")]
    pub function: String,
    #[serde(rename = "Comments")]
    pub comments: String,
    #[serde(rename = "Serial #/Asset Tag #")]
    pub serial_asset_tag_number: String,
    #[serde(rename = "VLAN/Network ID")]
    pub vlan_network_id: String,
    #[serde(rename = "System Administrator/Owner")]
    pub system_administrator_owner: String,
    #[serde(rename = "Application Administrator/Owner")]
    pub application_administrator_owner: String,
}

impl Row {
    /// The row as report cells, in [`HEADERS`] order.
    pub fn to_record(&self) -> Vec<String> {
        vec![
            self.unique_asset_identifier.clone(),
            self.ip_address.clone(),
            bool_cell(self.is_virtual).to_string(),
            bool_cell(self.is_public).to_string(),
            self.dns_name_or_url.clone(),
            self.netbios_name.clone(),
            self.mac_address.clone(),
            bool_cell(self.authenticated_scan).to_string(),
            self.baseline_configuration_name.clone(),
            self.os_name_and_version.clone(),
            self.location.clone(),
            self.asset_type.clone(),
            self.hardware_make_model.clone(),
            bool_cell(self.in_latest_scan).to_string(),
            self.software_database_vendor.clone(),
            self.software_database_name_and_version.clone(),
            self.patch_level.clone(),
            self.function.clone(),
            self.comments.clone(),
            self.serial_asset_tag_number.clone(),
            self.vlan_network_id.clone(),
            self.system_administrator_owner.clone(),
            self.application_administrator_owner.clone(),
        ]
    }
}

fn bool_cell(value: bool) -> &'static str {
    if value { "Yes" } else { "No" }
}

fn yes_no<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(bool_cell(*value))
}
