//! Mock catalog data: templates, assets, and the static lists the screens show.

/// Immutable template catalog entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Template {
    /// Stable id within the catalog.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Category tag, e.g. "#清新".
    pub tag: String,
    /// Preview image reference.
    pub image_url: String,
    /// Whether the template can produce a dynamic (video) avatar.
    pub is_dynamic: bool,
}

/// Lifecycle status of a user asset.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssetStatus {
    Completed,
    Processing,
    Failed,
    Original,
    Queued,
}

impl AssetStatus {
    /// Only finished results and uploaded originals have a detail view.
    pub fn is_viewable(self) -> bool {
        matches!(self, AssetStatus::Completed | AssetStatus::Original)
    }
}

/// A generated or uploaded user artifact.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Asset {
    pub id: String,
    pub name: String,
    /// Human readable timestamp label ("刚刚", "2小时前", ...).
    pub timestamp: String,
    pub image_url: String,
    pub status: AssetStatus,
    pub is_dynamic: bool,
    pub is_favorited: bool,
}

impl Asset {
    /// A freshly started generation for `template`.
    pub fn queued_from(template: &Template, timestamp: String) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: template.name.clone(),
            timestamp,
            image_url: template.image_url.clone(),
            status: AssetStatus::Queued,
            is_dynamic: template.is_dynamic,
            is_favorited: false,
        }
    }
}

fn template(id: &str, name: &str, tag: &str, seed: &str, is_dynamic: bool) -> Template {
    Template {
        id: id.into(),
        name: name.into(),
        tag: tag.into(),
        image_url: format!("https://picsum.photos/seed/{seed}/400/533"),
        is_dynamic,
    }
}

/// The built-in template catalog.
pub fn templates() -> Vec<Template> {
    vec![
        template("1", "樱花之梦", "#粉色", "cherry", true),
        template("2", "霓虹都市", "#赛博朋克", "neon", true),
        template("3", "夏日微风", "#清新", "summer", true),
        template("4", "惬意雨天", "#治愈", "rain", true),
        template("5", "校园时光", "#日常", "school", false),
        template("6", "星之魔法", "#梦幻", "magic", true),
    ]
}

/// Seed assets shown in the gallery on startup.
pub fn mock_assets() -> Vec<Asset> {
    let asset = |id: &str, name: &str, ts: &str, seed: &str, status, dynamic, fav| Asset {
        id: id.into(),
        name: name.into(),
        timestamp: ts.into(),
        image_url: format!("https://picsum.photos/seed/{seed}/400/533"),
        status,
        is_dynamic: dynamic,
        is_favorited: fav,
    };
    vec![
        asset("a1", "未来少女_V2", "刚刚", "cyber", AssetStatus::Completed, true, false),
        asset("a2", "IMG_2931.jpg", "2小时前", "photo", AssetStatus::Original, false, true),
        asset("a3", "梦境_Final", "生成中...", "dream", AssetStatus::Processing, false, false),
        asset("a4", "赛博朋克_01", "生成失败", "cyber2", AssetStatus::Failed, false, false),
    ]
}

/// Library category chip.
#[derive(Clone, Copy, Debug)]
pub struct Category {
    /// i18n key of the chip label.
    pub label_key: &'static str,
    /// Tag fragment to match; `None` shows every template.
    pub filter: Option<&'static str>,
}

pub const CATEGORIES: &[Category] = &[
    Category { label_key: "label_all", filter: None },
    Category { label_key: "label_hot", filter: None },
    Category { label_key: "label_category_fresh", filter: Some("清新") },
    Category { label_key: "label_category_dreamy", filter: Some("梦幻") },
    Category { label_key: "label_category_cyber", filter: Some("赛博") },
    Category { label_key: "label_category_school", filter: Some("日常") },
    Category { label_key: "label_category_aesthetic", filter: Some("粉色") },
];

impl Category {
    pub fn accepts(&self, template: &Template) -> bool {
        match self.filter {
            None => true,
            Some(f) => template.tag.contains(f),
        }
    }
}

/// Gallery filter chip.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssetFilter {
    All,
    Completed,
    Processing,
    Failed,
}

pub const ASSET_FILTERS: &[AssetFilter] = &[
    AssetFilter::All,
    AssetFilter::Completed,
    AssetFilter::Processing,
    AssetFilter::Failed,
];

impl AssetFilter {
    pub fn label_key(self) -> &'static str {
        match self {
            AssetFilter::All => "label_all",
            AssetFilter::Completed => "label_completed",
            AssetFilter::Processing => "label_processing",
            AssetFilter::Failed => "label_failed",
        }
    }

    pub fn accepts(self, asset: &Asset) -> bool {
        match self {
            AssetFilter::All => true,
            AssetFilter::Completed => asset.status == AssetStatus::Completed,
            // Queued work is shown together with running work.
            AssetFilter::Processing => {
                matches!(asset.status, AssetStatus::Processing | AssetStatus::Queued)
            }
            AssetFilter::Failed => asset.status == AssetStatus::Failed,
        }
    }
}

/// Selectable UI language.
#[derive(Clone, Copy, Debug)]
pub struct Language {
    pub label: &'static str,
    pub sub: &'static str,
    pub value: &'static str,
}

pub const LANGUAGES: &[Language] = &[
    Language { label: "简体中文", sub: "Simplified Chinese", value: "zh-CN" },
    Language { label: "English", sub: "English", value: "en-US" },
    Language { label: "繁体中文", sub: "Traditional Chinese", value: "zh-TW" },
    Language { label: "日本語", sub: "Japanese", value: "ja-JP" },
    Language { label: "한국어", sub: "Korean", value: "ko-KR" },
    Language { label: "Français", sub: "French", value: "fr-FR" },
    Language { label: "Deutsch", sub: "German", value: "de-DE" },
    Language { label: "Español", sub: "Spanish", value: "es-ES" },
];

/// Coin package offered on the purchase screen.
#[derive(Clone, Copy, Debug)]
pub struct CoinPackage {
    pub coins: u32,
    pub price: &'static str,
}

pub const COIN_PACKAGES: &[CoinPackage] = &[
    CoinPackage { coins: 50, price: "¥6" },
    CoinPackage { coins: 100, price: "¥12" },
    CoinPackage { coins: 300, price: "¥30" },
    CoinPackage { coins: 500, price: "¥48" },
    CoinPackage { coins: 1000, price: "¥88" },
    CoinPackage { coins: 2000, price: "¥168" },
];

/// Package preselected when the purchase screen opens.
pub const DEFAULT_PACKAGE: usize = 1;

/// Avatar URLs offered on the profile screen.
pub fn recommended_avatars() -> Vec<String> {
    (0..10)
        .map(|i| format!("https://picsum.photos/seed/avatar{i}/200/200"))
        .collect()
}

pub const APP_VERSION: &str = "v1.2.0";
pub const SUPPORT_EMAIL: &str = "support@dynamic-ai.com";
