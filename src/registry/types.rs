//! Registry types

use serde::{Deserialize, Serialize};

/// One vendor's entry in the registry file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VendorRegistryEntry {
    /// Vendor name as referenced by callers (matched case-insensitively)
    #[serde(rename = "vendorName")]
    pub vendor_name: String,
    /// Path to the vendor's own config file
    #[serde(rename = "configFilePath")]
    pub config_file_path: String,
}
