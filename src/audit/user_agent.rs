//! Best-effort user-agent classification
//!
//! Extracts a browser family/version, an OS family/version and a coarse
//! device type from a raw `User-Agent` header. Parsing never fails: anything
//! unrecognized comes back as family `Other` and device [`DeviceType::Unknown`],
//! and an empty header yields empty families.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

use super::entry::DeviceType;

/// A product family with its version, e.g. `Chrome 120.0.6099`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Family {
    pub name: String,
    pub version: String,
}

impl Family {
    fn new(name: &str, version: String) -> Self {
        Self {
            name: name.to_string(),
            version,
        }
    }

    fn other() -> Self {
        Self::new(OTHER, String::new())
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = format!("{} {}", self.name, self.version);
        f.write_str(rendered.trim())
    }
}

/// Family reported for non-empty agents that match no rule
pub const OTHER: &str = "Other";

/// Result of parsing one user-agent string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAgentInfo {
    pub device: DeviceType,
    pub browser: Family,
    pub os: Family,
    pub is_bot: bool,
}

impl UserAgentInfo {
    /// Classify a raw user-agent string
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() {
            return Self {
                device: DeviceType::Unknown,
                browser: Family::default(),
                os: Family::default(),
                is_bot: false,
            };
        }

        let is_bot = looks_like_bot(raw);
        let browser = first_match(browser_rules(), raw).unwrap_or_else(Family::other);
        let os = first_match(os_rules(), raw).unwrap_or_else(Family::other);
        let device = classify_device(raw, is_bot);

        Self {
            device,
            browser,
            os,
            is_bot,
        }
    }
}

/// Device type by priority: mobile, tablet, desktop, otherwise unknown
fn classify_device(raw: &str, is_bot: bool) -> DeviceType {
    if is_bot {
        return DeviceType::Unknown;
    }

    if is_mobile(raw) {
        DeviceType::Mobile
    } else if is_tablet(raw) {
        DeviceType::Tablet
    } else if is_pc(raw) {
        DeviceType::Desktop
    } else {
        DeviceType::Unknown
    }
}

fn is_tablet(raw: &str) -> bool {
    let android_tablet = raw.contains("Android") && !raw.contains("Mobile");
    let generic_tablet = raw.contains("Tablet") && !raw.contains("Tablet PC");

    raw.contains("iPad")
        || raw.contains("Kindle")
        || raw.contains("Silk/")
        || raw.contains("PlayBook")
        || android_tablet
        || generic_tablet
}

fn is_mobile(raw: &str) -> bool {
    if is_tablet(raw) {
        return false;
    }

    const MARKERS: [&str; 8] = [
        "iPhone",
        "iPod",
        "Windows Phone",
        "BlackBerry",
        "BB10",
        "Opera Mini",
        "Opera Mobi",
        "Mobile",
    ];
    MARKERS.iter().any(|marker| raw.contains(marker))
}

fn is_pc(raw: &str) -> bool {
    let windows_desktop = raw.contains("Windows NT") && !raw.contains("Windows Phone");
    let linux_desktop = (raw.contains("X11") || raw.contains("Linux")) && !raw.contains("Android");

    windows_desktop || raw.contains("Macintosh") || raw.contains("CrOS") || linux_desktop
}

/// One detection rule: family name, pattern, and how to render the version
struct Rule {
    family: &'static str,
    pattern: &'static str,
    version: VersionStyle,
}

#[derive(Clone, Copy)]
enum VersionStyle {
    /// Capture group 1, dotted, at most three components
    Dotted,
    /// Capture group 1 with `_` separators (iOS, older macOS)
    Underscored,
    /// Windows NT kernel version mapped to the marketing name
    WindowsNt,
}

const VERSION: &str = r"(\d+(?:\.\d+)*)";

fn rule(family: &'static str, pattern: &'static str) -> Rule {
    Rule {
        family,
        pattern,
        version: VersionStyle::Dotted,
    }
}

const BROWSER_RULES: &[(&str, &str)] = &[
    ("Edge", r"Edg(?:e|A|iOS)?/{v}"),
    ("Opera Mini", r"Opera Mini/{v}"),
    ("Opera", r"OPR/{v}"),
    ("Opera", r"Opera/.*Version/{v}"),
    ("Samsung Internet", r"SamsungBrowser/{v}"),
    ("Firefox iOS", r"FxiOS/{v}"),
    ("Firefox Mobile", r"Mobile;.*Firefox/{v}"),
    ("Firefox", r"Firefox/{v}"),
    ("Chrome Mobile iOS", r"CriOS/{v}"),
    ("Chrome Mobile", r"Android.*Chrome/{v}.*Mobile"),
    ("Chrome", r"Chrome/{v}"),
    ("Mobile Safari", r"(?:iPhone|iPad|iPod).*Version/{v}.*Safari"),
    ("Safari", r"Version/{v}.*Safari/"),
    ("IE", r"MSIE {v}"),
    ("IE", r"Trident/.*rv:{v}"),
    ("Googlebot", r"Googlebot/{v}"),
    ("Bingbot", r"bingbot/{v}"),
    ("curl", r"curl/{v}"),
    ("Python Requests", r"python-requests/{v}"),
];

fn browser_rules() -> &'static [(Rule, Regex)] {
    static RULES: OnceLock<Vec<(Rule, Regex)>> = OnceLock::new();
    RULES.get_or_init(|| {
        compile(
            BROWSER_RULES
                .iter()
                .map(|&(family, pattern)| rule(family, pattern)),
        )
    })
}

fn os_rules() -> &'static [(Rule, Regex)] {
    static RULES: OnceLock<Vec<(Rule, Regex)>> = OnceLock::new();
    RULES.get_or_init(|| {
        compile([
            rule("Windows Phone", r"Windows Phone(?: OS)? {v}"),
            Rule {
                family: "Windows",
                pattern: r"Windows NT (\d+\.\d+)",
                version: VersionStyle::WindowsNt,
            },
            Rule {
                family: "iOS",
                pattern: r"(?:iPhone|iPad|iPod).*? OS (\d+(?:_\d+)*)",
                version: VersionStyle::Underscored,
            },
            rule("Android", r"Android {v}"),
            rule("Android", r"Android()"),
            rule("Chrome OS", r"CrOS \S+ {v}"),
            Rule {
                family: "Mac OS X",
                pattern: r"Mac OS X (\d+(?:[_.]\d+)*)",
                version: VersionStyle::Underscored,
            },
            rule("Ubuntu", r"Ubuntu(?:/{v})?"),
            rule("Linux", r"Linux()"),
        ])
    })
}

/// Handset makers whose brand is a word ending in "bot"
const HANDSET_BRANDS: &[&str] = &["cubot"];

fn bot_regex() -> Option<&'static Regex> {
    static BOT: OnceLock<Option<Regex>> = OnceLock::new();
    BOT.get_or_init(|| Regex::new(r"(?i)(\w*bot)\b|crawler|spider|slurp").ok())
        .as_ref()
}

/// A crawler keyword, or any word ending in "bot" that is not a handset brand
fn looks_like_bot(raw: &str) -> bool {
    bot_regex().map_or(false, |re| {
        re.captures_iter(raw).any(|caps| match caps.get(1) {
            Some(word) => !HANDSET_BRANDS
                .iter()
                .any(|brand| word.as_str().eq_ignore_ascii_case(brand)),
            None => true,
        })
    })
}

/// Compile rule patterns, expanding `{v}` to the version capture group
///
/// Patterns are constants; any that fail to compile are skipped so
/// classification can never fail at runtime.
fn compile(rules: impl IntoIterator<Item = Rule>) -> Vec<(Rule, Regex)> {
    rules
        .into_iter()
        .filter_map(|rule| {
            let pattern = rule.pattern.replace("{v}", VERSION);
            Regex::new(&pattern).ok().map(|re| (rule, re))
        })
        .collect()
}

fn first_match(rules: &[(Rule, Regex)], raw: &str) -> Option<Family> {
    rules.iter().find_map(|(rule, re)| {
        let caps = re.captures(raw)?;
        let captured = caps.get(1).map_or("", |m| m.as_str());
        Some(Family::new(rule.family, render_version(captured, rule.version)))
    })
}

fn render_version(captured: &str, style: VersionStyle) -> String {
    match style {
        VersionStyle::Dotted => truncate_components(captured, '.'),
        VersionStyle::Underscored => truncate_components(&captured.replace('_', "."), '.'),
        VersionStyle::WindowsNt => match captured {
            "10.0" => "10".to_string(),
            "6.3" => "8.1".to_string(),
            "6.2" => "8".to_string(),
            "6.1" => "7".to_string(),
            "6.0" => "Vista".to_string(),
            "5.1" | "5.2" => "XP".to_string(),
            other => other.to_string(),
        },
    }
}

fn truncate_components(version: &str, sep: char) -> String {
    version
        .split(sep)
        .filter(|part| !part.is_empty())
        .take(3)
        .collect::<Vec<_>>()
        .join(".")
}
