//! Keyword tables consumed by the scorer.
//!
//! These are configuration data, not logic: tuning or localizing the
//! lists never touches the scoring rules.

/// Terms whose presence raises a message's relevance.
pub const HIGH_RELEVANCE_KEYWORDS: &[&str] = &[
    // Official announcements
    "announce",
    "launch",
    "release",
    "partnership",
    "listing",
    "staking",
    "governance",
    "proposal",
    "vote",
    "upgrade",
    "mainnet",
    "testnet",
    // Development
    "update",
    "fix",
    "bug",
    "feature",
    "roadmap",
    "milestone",
    "development",
    "code",
    "commit",
    "merge",
    "deploy",
    // Technical
    "consensus",
    "blockchain",
    "smart contract",
    "defi",
    "nft",
    "tokenomics",
    "whitepaper",
    "documentation",
    "api",
];

/// Terms whose presence marks a message as likely noise.
pub const SPAM_KEYWORDS: &[&str] = &[
    "moon",
    "lambo",
    "pump",
    "dump",
    "hodl",
    "diamond hands",
    "wen",
    "wen moon",
    "to the moon",
    "buy the dip",
    "sell the news",
];

/// Author substrings that mark a message as official.
pub const ADMIN_INDICATORS: &[&str] = &[
    "admin",
    "moderator",
    "official",
    "team",
    "founder",
    "ceo",
    "developer",
    "core team",
    "project",
];
