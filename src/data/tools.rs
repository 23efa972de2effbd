//! Simulated investigation tools
//!
//! Every lookup runs against canned intelligence; nothing leaves the process.

use super::ToolType;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Output of one tool invocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolResult {
    #[serde(rename = "type")]
    pub tool: ToolType,
    pub query: String,
    pub data: Value,
}

impl ToolResult {
    /// True when the lookup found nothing
    pub fn is_miss(&self) -> bool {
        self.data.get("error").is_some()
    }
}

/// Run a tool against the canned data set
pub fn run_tool(tool: ToolType, query: &str) -> ToolResult {
    let data = match tool {
        ToolType::Search => Value::Array(perform_search(query)),
        ToolType::Whois => whois_lookup(query),
        ToolType::Metadata => analyze_metadata(query),
        ToolType::Pastebin => search_pastebin(query),
        other => json!({
            "error": format!("The {} tool is unavailable in this build.", other),
        }),
    };
    ToolResult {
        tool,
        query: query.to_string(),
        data,
    }
}

/// Search results for the first known key contained in the query
pub fn perform_search(query: &str) -> Vec<Value> {
    let lower = query.to_lowercase();
    SEARCH_INDEX
        .iter()
        .find(|(key, _)| lower.contains(*key))
        .map(|(_, hits)| {
            hits.iter()
                .map(|(title, url, snippet)| json!({ "title": title, "url": url, "snippet": snippet }))
                .collect()
        })
        .unwrap_or_else(|| {
            vec![json!({
                "title": "No results found",
                "url": "#",
                "snippet": format!("No search results found for \"{}\". Try different keywords.", query),
            })]
        })
}

pub fn whois_lookup(target: &str) -> Value {
    let target = target.trim().to_lowercase();
    match target.as_str() {
        "sunrise-corp.io" => json!({
            "domain": "sunrise-corp.io",
            "registrar": "Namecheap, Inc.",
            "registrationDate": "2023-11-15",
            "expirationDate": "2024-11-15",
            "organization": "Sunrise Holdings LTD",
            "registrantCountry": "Panama",
            "nameservers": ["ns1.namecheap.com", "ns2.namecheap.com"],
            "status": "clientTransferProhibited",
        }),
        "45.33.32.156" => json!({
            "ip": "45.33.32.156",
            "organization": "DigitalOcean, LLC",
            "country": "Netherlands",
            "city": "Amsterdam",
            "asn": "AS14061",
            "range": "45.33.0.0/16",
            "reverseDNS": "example-vps.digitalocean.com",
        }),
        _ => json!({
            "domain": target,
            "error": "Domain not found in database. This may be a non-existent or unregistered domain.",
        }),
    }
}

pub fn analyze_metadata(file_name: &str) -> Value {
    match file_name.trim() {
        "evidence.jpg" | "suspicious_photo.jpg" => json!({
            "fileName": file_name.trim(),
            "fileSize": "2.4 MB",
            "cameraMake": "Canon",
            "cameraModel": "Canon EOS 5D Mark IV",
            "dateTime": "2023:08:15 14:23:17",
            "gpsLatitude": "37.7749° N",
            "gpsLongitude": "122.4194° W",
            "location": "San Francisco, CA, USA",
            "software": "Adobe Photoshop 2023",
        }),
        "leaked_screenshot.png" => json!({
            "fileName": "leaked_screenshot.png",
            "fileSize": "1.1 MB",
            "dateTime": "2024:10:20 09:15:42",
            "gpsLatitude": "55.7558° N",
            "gpsLongitude": "37.6173° E",
            "location": "Moscow, Russia",
            "software": "Windows Screenshot Tool",
        }),
        other => json!({
            "fileName": other,
            "error": "No metadata available for this file.",
        }),
    }
}

pub fn search_pastebin(paste_id: &str) -> Value {
    match paste_id.trim() {
        "a7f3k9m2" => json!({
            "id": "a7f3k9m2",
            "title": "[LEAK] Megacorp employee credentials",
            "author": "DataLeech",
            "date": "2024-10-18",
            "content": PASTE_A7F3K9M2,
        }),
        other => json!({
            "id": other,
            "error": "Paste not found.",
        }),
    }
}

const PASTE_A7F3K9M2: &str = "# Megacorp.com Employee Database Leak
# Found in unsecured S3 bucket
# 30 accounts total

admin@megacorp.com:P@ssw0rd123
john.doe@megacorp.com:Summer2024!
jane.smith@megacorp.com:MegaCorp#45
hr.manager@megacorp.com:HR2024secure
it.support@megacorp.com:ITdesk789
...

[Additional 25 accounts redacted]";

type SearchHit = (&'static str, &'static str, &'static str);

const SEARCH_INDEX: &[(&str, &[SearchHit])] = &[
    (
        "sunrise-corp.io",
        &[
            (
                "Sunrise Corp - Official Website",
                "https://sunrise-corp.io",
                "Welcome to Sunrise Corp. Premium business solutions for the digital age.",
            ),
            (
                "WHOIS sunrise-corp.io - DomainTools",
                "https://whois.domaintools.com/sunrise-corp.io",
                "Domain registration information for sunrise-corp.io. Registered 2023-11-15.",
            ),
            (
                "Sunrise Corp Reviews - TrustPilot",
                "https://trustpilot.com/sunrise-corp",
                "1.2 stars - Multiple reports of phishing attempts and fraudulent activity.",
            ),
        ],
    ),
    (
        "megacorp.com",
        &[
            (
                "Megacorp employee database leaked - Security News",
                "https://securitynews.io/megacorp-leak",
                "Major data breach exposes employee credentials...",
            ),
            (
                "[LEAK] Megacorp.com emails - Pastebin",
                "https://pastebin.com/a7f3k9m2",
                "Employee emails and passwords from megacorp.com domain...",
            ),
        ],
    ),
    (
        "45.33.32.156",
        &[
            (
                "IP Lookup 45.33.32.156 - IPinfo",
                "https://ipinfo.io/45.33.32.156",
                "Location: Amsterdam, Netherlands. Hosting: DigitalOcean. ASN: AS14061",
            ),
            (
                "Malicious activity from 45.33.32.156",
                "https://abuseipdb.com/check/45.33.32.156",
                "Reported for: SSH brute force, port scanning, malware distribution",
            ),
        ],
    ),
];
