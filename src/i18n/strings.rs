//! Static per-locale page strings and site-wide profile.
//!
//! Every supported locale needs an entry in `PAGE_STRINGS`; this is checked
//! once at startup by `MetadataCatalog::new`.

use std::borrow::Cow;

/// Localized page-level strings for one locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageStrings {
    /// Locale code this entry belongs to
    pub code: &'static str,

    /// `<title>` and Open Graph / Twitter title
    pub title: &'static str,

    /// Meta description and Open Graph / Twitter description
    pub description: &'static str,
}

/// Locale-independent facts about the site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteProfile {
    pub app_name: &'static str,
    pub site_name: &'static str,

    /// Base URL used for canonical and Open Graph URLs
    pub base_url: Cow<'static, str>,

    /// URL advertised in the JSON-LD application record
    pub app_url: Cow<'static, str>,

    pub keywords: &'static [&'static str],

    /// Social preview image, relative to `base_url`
    pub image_path: &'static str,
    pub image_width: u32,
    pub image_height: u32,
    pub image_alt: &'static str,

    pub favicon_path: &'static str,

    // JSON-LD application fields
    pub application_category: &'static str,
    pub operating_system: &'static str,
    pub application_description: &'static str,
    pub price: &'static str,
    pub price_currency: &'static str,
}

impl SiteProfile {
    /// Replace the deployment URLs, keeping everything else.
    pub fn with_urls(mut self, base_url: impl Into<String>, app_url: impl Into<String>) -> Self {
        self.base_url = Cow::Owned(base_url.into());
        self.app_url = Cow::Owned(app_url.into());
        self
    }
}

// ==================== Page Strings ====================

pub const ENGLISH_STRINGS: PageStrings = PageStrings {
    code: "en",
    title: "DiagramAI - AI-Powered Diagram Generator",
    description: "Create AWS architecture diagrams, flowcharts, and technical diagrams using AI. \
Free online tool integrating draw.io with AI assistance for professional diagram creation.",
};

pub const CHINESE_STRINGS: PageStrings = PageStrings {
    code: "zh",
    title: "DiagramAI - AI 智能图表生成器",
    description: "使用 AI 创建 AWS 架构图、流程图和技术图表。免费在线工具，集成 draw.io 和 AI 助手，专业图表创建。",
};

pub const JAPANESE_STRINGS: PageStrings = PageStrings {
    code: "ja",
    title: "DiagramAI - AI パワー図表ジェネレーター",
    description: "AI を使用して AWS アーキテクチャ図、フローチャート、技術図を作成します。\
draw.io と AI アシスタントを統合した無料オンラインツールでプロの図表を作成。",
};

/// Title/description table, one entry per built-in locale.
pub const PAGE_STRINGS: &[PageStrings] = &[ENGLISH_STRINGS, CHINESE_STRINGS, JAPANESE_STRINGS];

// ==================== Site Profile ====================

pub const SITE_PROFILE: SiteProfile = SiteProfile {
    app_name: "DiagramAI",
    site_name: "Next AI Draw.io",
    base_url: Cow::Borrowed("https://next-ai-drawio.jiang.jp"),
    app_url: Cow::Borrowed("https://diagram-ai.jiang.jp"),
    keywords: &[
        "AI diagram generator",
        "AWS architecture",
        "flowchart creator",
        "draw.io",
        "AI drawing tool",
        "technical diagrams",
        "diagram automation",
        "free diagram generator",
        "online diagram maker",
    ],
    image_path: "/architecture.png",
    image_width: 1200,
    image_height: 630,
    image_alt: "Next AI Draw.io - AI-powered diagram creation tool",
    favicon_path: "/favicon.ico",
    application_category: "DesignApplication",
    operating_system: "Web Browser",
    application_description: "AI-powered diagram generator with targeted XML editing capabilities \
that integrates with draw.io for creating AWS architecture diagrams, flowcharts, and technical \
diagrams. Features diagram history, multi-provider AI support, and real-time collaboration.",
    price: "0",
    price_currency: "USD",
};
