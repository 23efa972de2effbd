//! Mission definitions and the campaign catalog
//!
//! "The Neon Cross": track a cyber criminal syndicate from its pawns,
//! through its generals, up to the mastermind. Missions are immutable
//! catalog data; nothing at runtime writes to them.

use super::{Difficulty, MissionId, ToolType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single investigation case
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mission {
    pub id: MissionId,
    pub title: String,
    pub brief: String,
    pub difficulty: Difficulty,
    pub tools: Vec<ToolType>,

    /// Expected findings; the values are the tokens a good report mentions
    pub solution: BTreeMap<String, String>,

    pub explanation: String,
    pub hints: MissionHints,

    /// Selectable only when `player.level >= min_level`
    pub min_level: u32,

    /// Base reward at score 100, beginner mode, first completion
    pub xp_reward: u32,

    pub act: Option<u8>,
    pub antagonist_id: Option<String>,
}

/// Hints, split by game mode
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MissionHints {
    pub beginner: Vec<String>,
    pub expert: Vec<String>,
}

impl Mission {
    /// Minimal mission, mostly useful for custom catalogs
    pub fn new(id: MissionId, title: &str, min_level: u32, xp_reward: u32) -> Self {
        Self {
            id,
            title: title.to_string(),
            brief: String::new(),
            difficulty: Difficulty::Beginner,
            tools: Vec::new(),
            solution: BTreeMap::new(),
            explanation: String::new(),
            hints: MissionHints::default(),
            min_level,
            xp_reward,
            act: None,
            antagonist_id: None,
        }
    }

    pub fn with_solution(mut self, solution: &[(&str, &str)]) -> Self {
        self.solution = solution
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        self
    }

    /// Ground-truth tokens, in key order
    pub fn solution_values(&self) -> Vec<&str> {
        self.solution.values().map(String::as_str).collect()
    }

    /// All expected findings joined for display or instructor prompts
    pub fn expected_answer(&self) -> String {
        self.solution
            .iter()
            .map(|(k, v)| format!("{}: {}", k, v))
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn is_unlocked_at(&self, level: u32) -> bool {
        level >= self.min_level
    }
}

/// Read-only mission lookup
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    missions: Vec<Mission>,
}

impl Catalog {
    pub fn new(mut missions: Vec<Mission>) -> Self {
        missions.sort_by_key(|m| m.id);
        missions.dedup_by_key(|m| m.id);
        Self { missions }
    }

    /// The full built-in campaign
    pub fn campaign() -> Self {
        Self::new(CAMPAIGN.iter().map(Mission::from).collect())
    }

    pub fn get(&self, id: MissionId) -> Option<&Mission> {
        self.missions
            .binary_search_by_key(&id, |m| m.id)
            .ok()
            .map(|idx| &self.missions[idx])
    }

    pub fn missions(&self) -> &[Mission] {
        &self.missions
    }

    pub fn len(&self) -> usize {
        self.missions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.missions.is_empty()
    }

    /// Missions a player at `level` may attempt
    pub fn available_for(&self, level: u32) -> impl Iterator<Item = &Mission> {
        self.missions.iter().filter(move |m| m.is_unlocked_at(level))
    }
}

/// A story act
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Act {
    pub number: u8,
    pub title: &'static str,
    pub description: &'static str,
    pub first_mission: MissionId,
    pub last_mission: MissionId,
}

pub const ACTS: [Act; 3] = [
    Act {
        number: 1,
        title: "The Pawns",
        description: "Coordinated attacks lead to a shadowy network. Identify the foot soldiers and trace their commanders.",
        first_mission: 1,
        last_mission: 8,
    },
    Act {
        number: 2,
        title: "The Generals",
        description: "The operatives were pawns. Expose the commanders coordinating global operations.",
        first_mission: 9,
        last_mission: 18,
    },
    Act {
        number: 3,
        title: "The Shepherd's Shadow",
        description: "The inner circle, and then the mastermind who calls himself Abaddon.",
        first_mission: 19,
        last_mission: 25,
    },
];

pub fn act_for(mission_id: MissionId) -> Option<&'static Act> {
    ACTS.iter()
        .find(|act| (act.first_mission..=act.last_mission).contains(&mission_id))
}

/// Static campaign entry
struct CampaignEntry {
    id: MissionId,
    title: &'static str,
    brief: &'static str,
    difficulty: Difficulty,
    tools: &'static [ToolType],
    solution: &'static [(&'static str, &'static str)],
    explanation: &'static str,
    beginner_hints: &'static [&'static str],
    expert_hints: &'static [&'static str],
    xp_reward: u32,
    act: u8,
    antagonist: Option<&'static str>,
}

impl From<&CampaignEntry> for Mission {
    fn from(entry: &CampaignEntry) -> Self {
        Mission {
            id: entry.id,
            title: entry.title.to_string(),
            brief: entry.brief.to_string(),
            difficulty: entry.difficulty,
            tools: entry.tools.to_vec(),
            solution: entry
                .solution
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            explanation: entry.explanation.to_string(),
            hints: MissionHints {
                beginner: entry.beginner_hints.iter().map(|h| h.to_string()).collect(),
                expert: entry.expert_hints.iter().map(|h| h.to_string()).collect(),
            },
            // The live campaign opens every case at level 1
            min_level: 1,
            xp_reward: entry.xp_reward,
            act: Some(entry.act),
            antagonist_id: entry.antagonist.map(str::to_string),
        }
    }
}

use Difficulty::{Advanced, Beginner as Easy, Expert as Hard, Intermediate};
use ToolType::*;

const CAMPAIGN: &[CampaignEntry] = &[
    // Act 1: the pawns
    CampaignEntry {
        id: 1,
        title: "Operation First Light",
        brief: "A phishing campaign targeting small businesses has been detected. The domain 'sunrise-corp.io' is suspected. Investigate the domain registration and find who's behind it.",
        difficulty: Easy,
        tools: &[Search, Whois],
        solution: &[("registered", "2023"), ("organization", "Sunrise Holdings LTD"), ("registrant", "GhostTrader")],
        explanation: "WHOIS data reveals domain ownership. GhostTrader is selling stolen credentials. You've found your first thread.",
        beginner_hints: &[
            "Use WHOIS tool with 'sunrise-corp.io'",
            "Check the registration date - new domains often indicate phishing",
            "Note the registrant organization name",
        ],
        expert_hints: &["Cross-reference with breach databases"],
        xp_reward: 100,
        act: 1,
        antagonist: Some("ghost_trader"),
    },
    CampaignEntry {
        id: 2,
        title: "Case: Hidden Witness",
        brief: "An anonymous tip included a photo 'evidence.jpg' claiming to show a meeting between criminals. Extract the GPS coordinates and camera data from its metadata.",
        difficulty: Easy,
        tools: &[Metadata],
        solution: &[("latitude", "37.7749"), ("longitude", "-122.4194"), ("camera", "Canon EOS 5D"), ("timestamp", "2023-08-15")],
        explanation: "Metadata tells stories that criminals forget to erase. The photo links back to PixelPhantom, and the GPS coordinates point to a known dead drop.",
        beginner_hints: &[
            "Use metadata tool on 'evidence.jpg'",
            "GPS coordinates reveal the exact location",
            "Camera model can verify authenticity",
        ],
        expert_hints: &["Check if the timestamp aligns with other intelligence"],
        xp_reward: 100,
        act: 1,
        antagonist: Some("pixel_phantom"),
    },
    CampaignEntry {
        id: 3,
        title: "Operation Google Shepherd",
        brief: "MegaCorp accidentally exposed internal documents. Use advanced search operators to find PDFs and spreadsheets from 'megacorp.com'.",
        difficulty: Easy,
        tools: &[Search],
        solution: &[("technique", "site:megacorp.com filetype:pdf"), ("files_found", "classified"), ("breach_evidence", "confirmed")],
        explanation: "Google dorking revealed how DataLeech gained access: exposed configuration files.",
        beginner_hints: &[
            "Try: site:megacorp.com filetype:pdf",
            "Look for sensitive documents in results",
            "Common formats: pdf, xls, doc, conf",
        ],
        expert_hints: &["Combine multiple operators for precision"],
        xp_reward: 150,
        act: 1,
        antagonist: Some("data_leech"),
    },
    CampaignEntry {
        id: 4,
        title: "The Betrayed Trust",
        brief: "Employee credentials from MegaCorp surfaced on a paste site. Find paste ID 'a7f3k9m2' and count the exposed credentials.",
        difficulty: Intermediate,
        tools: &[Pastebin, Search],
        solution: &[("emails_found", "30"), ("paste_id", "a7f3k9m2"), ("domain", "megacorp.com"), ("uploader", "DataLeech")],
        explanation: "Thirty stolen credentials. DataLeech harvests data without mercy, and these are people whose lives are now at risk.",
        beginner_hints: &[
            "Use pastebin tool with ID 'a7f3k9m2'",
            "Count all email addresses carefully",
            "Note who uploaded this data",
        ],
        expert_hints: &["Search for related pastes to find the full scope"],
        xp_reward: 200,
        act: 1,
        antagonist: Some("data_leech"),
    },
    CampaignEntry {
        id: 5,
        title: "Shadow Infrastructure",
        brief: "IP address 45.33.32.156 is linked to command-and-control servers. Identify the hosting provider, location, and associated domains.",
        difficulty: Intermediate,
        tools: &[Whois, Search],
        solution: &[("hosting", "DigitalOcean"), ("country", "Netherlands"), ("associated_domains", "5"), ("operator", "ShadowCourier")],
        explanation: "Hosting in the Netherlands, deliberately distributed to avoid detection. ShadowCourier coordinates cryptocurrency movements from here.",
        beginner_hints: &[
            "WHOIS lookup on 45.33.32.156",
            "Organization field shows hosting provider",
            "Search the IP to find linked domains",
        ],
        expert_hints: &["Check the ASN for IP range patterns"],
        xp_reward: 250,
        act: 1,
        antagonist: Some("shadow_courier"),
    },
    CampaignEntry {
        id: 6,
        title: "Case: False Signals",
        brief: "Someone is spreading disinformation about emergency services. DNS records for 'emergencyalert.net' might reveal the truth.",
        difficulty: Intermediate,
        tools: &[Dns, Search],
        solution: &[("nameserver", "malicious-ns.com"), ("redirect_ip", "45.33.32.156"), ("operator", "SignalJammer"), ("purpose", "disinformation")],
        explanation: "SignalJammer redirects emergency communications to fake sites, spreading chaos during a crisis.",
        beginner_hints: &[
            "Check DNS records for emergencyalert.net",
            "Look for unusual name servers",
            "Note any IP redirections",
        ],
        expert_hints: &["Compare current DNS with historical records"],
        xp_reward: 250,
        act: 1,
        antagonist: Some("signal_jammer"),
    },
    CampaignEntry {
        id: 7,
        title: "The Ransomed",
        brief: "A hospital was hit with ransomware. Analyze the headers from 'ransom-demand@darkmail.to' and identify the true origin.",
        difficulty: Intermediate,
        tools: &[Email, Search],
        solution: &[("origin_ip", "45.33.32.156"), ("email_provider", "darkmail.to"), ("attacker", "CryptoViper"), ("targets", "hospitals")],
        explanation: "CryptoViper targets hospitals. The demand came through anonymized email, but the headers tell the truth.",
        beginner_hints: &[
            "Analyze email headers for origin IP",
            "Check for anonymization services",
            "Note the email routing path",
        ],
        expert_hints: &["Look for patterns in timing and infrastructure"],
        xp_reward: 300,
        act: 1,
        antagonist: Some("crypto_viper"),
    },
    CampaignEntry {
        id: 8,
        title: "Operation Watchtower",
        brief: "The pawns all point to something bigger. Analyze certificate transparency logs for '*.neoncross.net' to find all subdomains.",
        difficulty: Advanced,
        tools: &[Cert, Dns, Search],
        solution: &[
            ("subdomains", "infrastructure.neoncross.net, command.neoncross.net, recruit.neoncross.net"),
            ("total_count", "12"),
            ("organization", "The Neon Cross"),
            ("next_tier", "generals"),
        ],
        explanation: "Certificate logs revealed the scope: The Neon Cross syndicate, coordinated by generals.",
        beginner_hints: &[
            "Search certificate transparency logs for neoncross.net",
            "List all discovered subdomains",
            "Count the total infrastructure",
        ],
        expert_hints: &["Map the organizational structure from subdomain names"],
        xp_reward: 400,
        act: 1,
        antagonist: Some("cert_thief"),
    },
    // Act 2: the generals
    CampaignEntry {
        id: 9,
        title: "Operation Iron Foundation",
        brief: "IronBishop controls the technical infrastructure. Track down their server network by analyzing ASN data and IP ranges.",
        difficulty: Advanced,
        tools: &[Whois, Dns, Search],
        solution: &[
            ("asn", "AS64512"),
            ("ip_range", "45.33.32.0/24"),
            ("server_count", "47"),
            ("general", "IronBishop"),
            ("weakness", "centralized_dns"),
        ],
        explanation: "IronBishop built an empire on distributed servers, but their DNS is centralized. One point of failure.",
        beginner_hints: &[
            "Look up ASN information for their network",
            "Map the IP range allocation",
            "Count servers in the infrastructure",
        ],
        expert_hints: &["Identify the DNS chokepoint"],
        xp_reward: 450,
        act: 2,
        antagonist: Some("iron_bishop"),
    },
    CampaignEntry {
        id: 10,
        title: "The Oracle's Eyes",
        brief: "CrimsonOracle gathers intelligence on law enforcement. Find their surveillance network before they find you.",
        difficulty: Advanced,
        tools: &[Search, Breach],
        solution: &[
            ("surveillance_tools", "SocialEye, DataBrokerPro"),
            ("your_exposure", "moderate"),
            ("general", "CrimsonOracle"),
            ("counter_intel", "operational security compromised"),
        ],
        explanation: "CrimsonOracle has been watching you. Counter-surveillance is crucial.",
        beginner_hints: &[
            "Search for surveillance tools targeting investigators",
            "Check what information is public about you",
            "Identify the intelligence gathering methods",
        ],
        expert_hints: &["Use this knowledge to feed them false information"],
        xp_reward: 500,
        act: 2,
        antagonist: Some("crimson_oracle"),
    },
    CampaignEntry {
        id: 11,
        title: "Mercury's Web",
        brief: "MercuryHand coordinates operations across time zones. Analyze leaked chat logs and timestamps to find the coordination hub.",
        difficulty: Advanced,
        tools: &[Search, Metadata],
        solution: &[
            ("time_zones", "UTC, UTC+8, UTC-5"),
            ("coordination_hub", "Singapore"),
            ("general", "MercuryHand"),
            ("operation_window", "02:00-04:00 UTC"),
        ],
        explanation: "Operations run around the clock, but orders originate in Singapore.",
        beginner_hints: &[
            "Analyze chat timestamps for patterns",
            "Convert times to different zones",
            "Find where most activity originates",
        ],
        expert_hints: &["Identify the command-and-control window"],
        xp_reward: 500,
        act: 2,
        antagonist: Some("mercury_hand"),
    },
    CampaignEntry {
        id: 12,
        title: "Case: The Enforcer",
        brief: "A whistleblower went missing after contacting authorities. Decode their last encrypted message before VoidMarshal finds them.",
        difficulty: Hard,
        tools: &[Search, Email, Breach],
        solution: &[
            ("whistleblower_location", "Safe House Beta"),
            ("threat_level", "Critical"),
            ("general", "VoidMarshal"),
            ("encryption_key", "base64_encoded"),
            ("time_remaining", "48 hours"),
        ],
        explanation: "The message pointed to Safe House Beta. The whistleblower was extracted two hours before VoidMarshal arrived.",
        beginner_hints: &[
            "Look for common encryption patterns",
            "Check for base64 encoding",
            "Cross-reference safe house locations",
        ],
        expert_hints: &["Time is critical - work backwards from the threat"],
        xp_reward: 600,
        act: 2,
        antagonist: Some("void_marshal"),
    },
    CampaignEntry {
        id: 13,
        title: "Silver Tongued Serpent",
        brief: "SilverTongue recruits through dark web forums. Identify the tactics, target demographics, and messaging patterns.",
        difficulty: Hard,
        tools: &[Search, Pastebin],
        solution: &[
            ("recruitment_sites", "darkforum.onion, cryptoanarchy.net"),
            ("target_demo", "disillusioned youth, hacktivists"),
            ("general", "SilverTongue"),
            ("messaging", "false_prophet_tactics"),
            ("conversion_rate", "12%"),
        ],
        explanation: "SilverTongue wraps criminal recruitment in revolutionary rhetoric. Your analysis exposed the pipeline.",
        beginner_hints: &[
            "Search dark web recruitment forums",
            "Analyze the messaging and promises",
            "Identify who they're targeting",
        ],
        expert_hints: &["Study the psychological manipulation techniques"],
        xp_reward: 600,
        act: 2,
        antagonist: Some("silver_tongue"),
    },
    CampaignEntry {
        id: 14,
        title: "Operation Cross-Reference",
        brief: "Correlate the intelligence gathered on every general. Find the server that coordinates them all.",
        difficulty: Hard,
        tools: &[Search, Dns, Cert],
        solution: &[
            ("coordination_server", "inner.neoncross.net"),
            ("access_level", "lieutenant-only"),
            ("generals_reporting_to", "inner_circle"),
            ("evidence", "command_structure_confirmed"),
        ],
        explanation: "All generals report to inner.neoncross.net. Above them sits an inner circle, and above that, The Shepherd.",
        beginner_hints: &[
            "Look for common infrastructure across all generals",
            "Check DNS records for coordination servers",
            "Map the command structure",
        ],
        expert_hints: &["Certificate logs will show the full hierarchy"],
        xp_reward: 700,
        act: 2,
        antagonist: Some("iron_bishop"),
    },
    CampaignEntry {
        id: 15,
        title: "The Mole Hunt",
        brief: "One of the generals is leaking information to a rival syndicate. Use communication patterns to identify the traitor.",
        difficulty: Hard,
        tools: &[Search, Email, Dns],
        solution: &[
            ("traitor", "MercuryHand"),
            ("rival_syndicate", "The Red Hand"),
            ("communication_method", "steganography"),
            ("motivation", "power_play"),
            ("evidence_location", "hidden_in_images"),
        ],
        explanation: "MercuryHand hid messages to The Red Hand inside image files, planning to overthrow The Shepherd.",
        beginner_hints: &[
            "Analyze communication patterns for anomalies",
            "Check for unusual data transfers",
            "Look for steganography in shared files",
        ],
        expert_hints: &["The traitor will have two separate communication channels"],
        xp_reward: 700,
        act: 2,
        antagonist: Some("mercury_hand"),
    },
    CampaignEntry {
        id: 16,
        title: "Operation Firewall Down",
        brief: "IronBishop is rebuilding. Identify their new nameservers and report them before the changes propagate.",
        difficulty: Hard,
        tools: &[Dns, Whois, Search],
        solution: &[
            ("new_nameservers", "ns1.backup-iron.net, ns2.backup-iron.net"),
            ("registrar", "NameCheap"),
            ("report_submitted", "abuse@namecheap.com"),
            ("general", "IronBishop"),
            ("status", "infrastructure_destroyed"),
        ],
        explanation: "The new nameservers were reported in time. IronBishop's infrastructure collapsed.",
        beginner_hints: &[
            "Find their new DNS infrastructure",
            "Identify the registrar",
            "Report to abuse contacts",
        ],
        expert_hints: &["Act fast - DNS changes propagate quickly"],
        xp_reward: 800,
        act: 2,
        antagonist: Some("iron_bishop"),
    },
    CampaignEntry {
        id: 17,
        title: "The Oracle Falls",
        brief: "Turn CrimsonOracle's surveillance tools against them. Find their intelligence database and expose their methods.",
        difficulty: Hard,
        tools: &[Search, Breach, Pastebin],
        solution: &[
            ("oracle_database", "intel-db.neoncross.net"),
            ("records_exposed", "10,000+"),
            ("methods_revealed", "social_media_monitoring, data_brokers, OSINT"),
            ("general", "CrimsonOracle"),
            ("status", "credibility_destroyed"),
        ],
        explanation: "The database is public now. The Oracle who saw everything can see nothing.",
        beginner_hints: &[
            "Find their intelligence database",
            "Extract and document their methods",
            "Publish the findings publicly",
        ],
        expert_hints: &["Use paste sites and media outlets for maximum exposure"],
        xp_reward: 800,
        act: 2,
        antagonist: Some("crimson_oracle"),
    },
    CampaignEntry {
        id: 18,
        title: "Operation Shepherd's Warning",
        brief: "An encrypted message arrived from The Shepherd himself. Decrypt his warning and his challenge.",
        difficulty: Hard,
        tools: &[Search, Cert, Breach],
        solution: &[
            ("message_decoded", "Congratulations, Detective. You've proven worthy. But can you find ME?"),
            ("signature", "The Shepherd - Abaddon"),
            ("challenge_accepted", "true"),
            ("next_phase", "inner_circle"),
            ("warning", "he_knows_you"),
        ],
        explanation: "The message is signed Abaddon. The generals were expendable; the inner circle is the real test.",
        beginner_hints: &[
            "Use all OSINT techniques learned so far",
            "Look for patterns in previous encrypted messages",
            "The key is in the signature",
        ],
        expert_hints: &["The Shepherd wants you to find him. Question why."],
        xp_reward: 900,
        act: 2,
        antagonist: None,
    },
    // Act 3: the shepherd's shadow
    CampaignEntry {
        id: 19,
        title: "The Judas Protocol",
        brief: "A law enforcement agency has been compromised by a planted mole. Identify the insider before they leak your investigation.",
        difficulty: Hard,
        tools: &[Search, Email, Breach],
        solution: &[
            ("mole_identified", "Agent Martinez"),
            ("department", "Cyber Crimes Division"),
            ("evidence", "leaked_case_files"),
            ("handler", "JudasProtocol"),
            ("compensation", "cryptocurrency_payments"),
        ],
        explanation: "Agent Martinez sold case files to JudasProtocol for cryptocurrency.",
        beginner_hints: &[
            "Look for unusual access patterns in case files",
            "Check for cryptocurrency transactions",
            "Analyze communication timing",
        ],
        expert_hints: &["The mole will access files they have no operational need for"],
        xp_reward: 1000,
        act: 3,
        antagonist: Some("judas_protocol"),
    },
    CampaignEntry {
        id: 20,
        title: "The Seven Seals",
        brief: "SevenSeals protects The Shepherd's communications. Find the implementation flaw and decrypt the inner circle's messages.",
        difficulty: Hard,
        tools: &[Search, Cert, Email],
        solution: &[
            ("encryption_type", "AES-256 with custom key derivation"),
            ("implementation_flaw", "timestamp_based_seed"),
            ("decrypted_messages", "operational_plans"),
            ("lieutenant", "SevenSeals"),
            ("revelation", "shepherd_location_hint"),
        ],
        explanation: "Timestamp-seeded key derivation was the flaw. The messages name 'Sanctuary-7'.",
        beginner_hints: &[
            "Analyze the encryption implementation",
            "Look for pattern-based key generation",
            "Check for timestamp dependencies",
        ],
        expert_hints: &["Military-grade doesn't mean perfect - find the human error"],
        xp_reward: 1000,
        act: 3,
        antagonist: Some("seven_seals"),
    },
    CampaignEntry {
        id: 21,
        title: "Operation Lazarus",
        brief: "LazarusNode rebuilds everything you shut down. Find their backup infrastructure, recovery protocols, and offline storage.",
        difficulty: Hard,
        tools: &[Search, Dns, Whois, Cert],
        solution: &[
            ("backup_locations", "3 continents, 7 data centers"),
            ("recovery_protocol", "automated_resurrection"),
            ("offline_storage", "cold_wallets, encrypted_drives"),
            ("lieutenant", "LazarusNode"),
            ("destruction_method", "simultaneous_takedown"),
        ],
        explanation: "Every backup was mapped and seized in simultaneous raids. No more resurrections.",
        beginner_hints: &[
            "Map all backup infrastructure",
            "Identify recovery automation",
            "Find offline storage locations",
        ],
        expert_hints: &["Simultaneous action required - they can't rebuild if everything falls at once"],
        xp_reward: 1100,
        act: 3,
        antagonist: Some("lazarus_node"),
    },
    CampaignEntry {
        id: 22,
        title: "The Inner Circle Crumbles",
        brief: "The lieutenants are finished. Analyze the power vacuum: who is loyal, who is running, who wants control.",
        difficulty: Hard,
        tools: &[Search, Breach, Email, Dns],
        solution: &[
            ("loyalists", "3 unknown operatives"),
            ("deserters", "12 mid-level members"),
            ("power_grab", "none - Shepherd maintains control"),
            ("shepherd_message", "Come find me, Detective"),
            ("location_clue", "Sanctuary-7 coordinates unlocked"),
        ],
        explanation: "No power grab. The Shepherd's grip holds, and his message encodes the coordinates of Sanctuary-7.",
        beginner_hints: &[
            "Monitor communications for power struggles",
            "Track who remains loyal",
            "Decode the Shepherd's message",
        ],
        expert_hints: &["This is a trap. But it's also your only chance."],
        xp_reward: 1200,
        act: 3,
        antagonist: None,
    },
    CampaignEntry {
        id: 23,
        title: "Sanctuary-7 Located",
        brief: "Sanctuary-7 is a private island compound. Map the facility: every entrance, every blind spot, every escape route.",
        difficulty: Hard,
        tools: &[Search, Metadata, Dns, Cert],
        solution: &[
            ("location", "Private island, coordinates 13.4443, 144.7937"),
            ("facility_type", "Data center disguised as resort"),
            ("entrances", "3 - main dock, helipad, service tunnel"),
            ("security", "Advanced surveillance, armed guards"),
            ("shepherd_presence", "Confirmed - 24/7 occupancy"),
            ("weakness", "Service tunnel - minimal monitoring"),
        ],
        explanation: "A fortress posing as a tech retreat. The service tunnel is the best entry point.",
        beginner_hints: &[
            "Use satellite imagery for facility layout",
            "Track supply ships for schedules",
            "Map all entry and exit points",
        ],
        expert_hints: &["Find the weakness - every fortress has one"],
        xp_reward: 1300,
        act: 3,
        antagonist: Some("abaddon"),
    },
    CampaignEntry {
        id: 24,
        title: "The Shepherd's True Face",
        brief: "Access The Shepherd's personal files. Find out who he really is, why he built this empire, and what drives him.",
        difficulty: Hard,
        tools: &[Search, Breach, Metadata, Email],
        solution: &[
            ("real_name", "Dr. Elijah Cross"),
            ("background", "Former FBI cyber division"),
            ("motivation", "Revenge against corruption"),
            ("ideology", "Destroy the corrupt system from within"),
            ("victims", "Thousands"),
            ("self_justification", "Necessary evil for greater good"),
        ],
        explanation: "Dr. Elijah Cross, formerly of the FBI cyber division. A fallen guardian.",
        beginner_hints: &[
            "Access personal file servers",
            "Search for background records",
            "Read his manifesto and communications",
        ],
        expert_hints: &["The truth is in what he tells himself, not what he tells others"],
        xp_reward: 1400,
        act: 3,
        antagonist: Some("abaddon"),
    },
    CampaignEntry {
        id: 25,
        title: "Operation Shepherd's Fall",
        brief: "Compile the complete case against Dr. Elijah Cross: identity, crimes, network, victims. Make it airtight.",
        difficulty: Hard,
        tools: &[Search, Whois, Dns, Email, Metadata, Breach, Cert, Pastebin],
        solution: &[
            ("evidence_package", "Complete - identity, crimes, victims, infrastructure"),
            ("total_victims", "2,847 individuals, 134 organizations"),
            ("financial_damage", "$487 million"),
            ("confession", "Obtained through evidence confrontation"),
            ("outcome", "Arrested - maximum security"),
            ("legacy", "The Neon Cross dismantled completely"),
            ("your_codename", "Vindicated"),
            ("final_scripture", "The truth has set them free"),
        ],
        explanation: "Confronted with every victim and every crime, he confessed. The Neon Cross is finished. Case closed.",
        beginner_hints: &[
            "Compile all evidence from previous missions",
            "Document every victim and crime",
            "Present irrefutable proof",
        ],
        expert_hints: &["The truth itself is your greatest weapon"],
        xp_reward: 2000,
        act: 3,
        antagonist: Some("abaddon"),
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn campaign_has_twenty_five_ordered_missions() {
        let catalog = Catalog::campaign();
        assert_eq!(catalog.len(), 25);
        let ids: Vec<_> = catalog.missions().iter().map(|m| m.id).collect();
        assert_eq!(ids, (1..=25).collect::<Vec<_>>());
    }

    #[test]
    fn every_mission_has_solution_and_reward() {
        for mission in Catalog::campaign().missions() {
            assert!(!mission.solution.is_empty(), "mission {} has no solution", mission.id);
            assert!(mission.xp_reward > 0);
            assert!(!mission.tools.is_empty());
            assert!(mission.act.is_some());
        }
    }

    #[test]
    fn lookup_by_id() {
        let catalog = Catalog::campaign();
        let first = catalog.get(1).unwrap();
        assert_eq!(first.title, "Operation First Light");
        assert_eq!(first.xp_reward, 100);
        assert!(first.solution_values().contains(&"GhostTrader"));
        assert!(catalog.get(0).is_none());
        assert!(catalog.get(26).is_none());
    }

    #[test]
    fn acts_cover_the_campaign() {
        for id in 1..=25 {
            let act = act_for(id).unwrap();
            assert_eq!(Some(act.number), Catalog::campaign().get(id).unwrap().act);
        }
        assert!(act_for(26).is_none());
    }

    #[test]
    fn custom_catalog_gates_by_level() {
        let catalog = Catalog::new(vec![
            Mission::new(2, "Locked", 5, 300),
            Mission::new(1, "Open", 1, 100),
        ]);
        let open: Vec<_> = catalog.available_for(3).map(|m| m.id).collect();
        assert_eq!(open, vec![1]);
        assert_eq!(catalog.available_for(5).count(), 2);
    }

    #[test]
    fn expected_answer_lists_findings() {
        let mission = Mission::new(1, "t", 1, 100).with_solution(&[("b", "two"), ("a", "one")]);
        assert_eq!(mission.expected_answer(), "a: one, b: two");
        assert_eq!(mission.solution_values(), vec!["one", "two"]);
    }
}
