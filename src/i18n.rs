//! Locale-keyed UI strings.
//!
//! Lookup order is the requested locale, then `zh-CN`, then the key itself.

pub const DEFAULT_LOCALE: &str = "zh-CN";

const ZH_CN: &[(&str, &str)] = &[
    ("app_name", "动态头像"),
    ("splash_engine", "AI 引擎启动中"),
    ("tab_library", "模板库"),
    ("tab_assets", "我的素材库"),
    ("tab_settings", "设置"),
    ("label_all", "全部"),
    ("label_hot", "热门"),
    ("label_category_fresh", "清新"),
    ("label_category_dreamy", "梦幻"),
    ("label_category_cyber", "赛博"),
    ("label_category_school", "校园"),
    ("label_category_aesthetic", "唯美"),
    ("label_downloading", "下载中"),
    ("label_dynamic", "动态"),
    ("label_completed", "已完成"),
    ("label_processing", "生成中"),
    ("label_failed", "失败"),
    ("label_original", "原图"),
    ("label_queueing", "排队中..."),
    ("label_fail_retry", "生成失败，点击重试"),
    ("label_empty", "暂无内容"),
    ("upload_title", "上传照片"),
    ("upload_hint", "为了获得最佳效果，请上传一张光线充足、五官清晰的正面照片。"),
    ("upload_check_front", "正面清晰"),
    ("upload_check_dark", "光线昏暗"),
    ("upload_check_cover", "遮挡面部"),
    ("btn_start", "开始生成"),
    ("btn_creating", "正在创建..."),
    ("modal_success_title", "创建成功"),
    ("modal_success_body", "您的{name}动态头像已经在开始制作，点击查看我的素材可以查看"),
    ("btn_view_assets", "查看我的素材"),
    ("btn_continue", "继续生成"),
    ("detail_title", "生成动态头像"),
    ("label_live", "Live"),
    ("label_favorited", "已收藏"),
    ("label_not_favorited", "未收藏"),
    ("delete_title", "删除素材"),
    ("confirm_delete", "确定删除「{name}」吗？"),
    ("btn_confirm", "确定"),
    ("btn_cancel", "取消"),
    ("label_profile", "个人资料"),
    ("label_coins", "金币"),
    ("btn_recharge", "充值"),
    ("label_legal", "法律条款"),
    ("label_privacy", "隐私政策"),
    ("label_agreement", "用户协议"),
    ("label_general", "通用"),
    ("label_lang", "语言"),
    ("label_darkmode", "深色模式"),
    ("label_support", "支持"),
    ("label_contact", "联系我们"),
    ("label_about", "关于我们"),
    ("label_on", "开"),
    ("label_off", "关"),
    ("profile_title", "更换头像"),
    ("btn_save_changes", "保存更改"),
    ("label_pro_title", "金币充值"),
    ("label_pro_desc", "使用金币解锁更多动态模板"),
    ("label_coins_note", "金币永久有效，消耗完毕需再次购买。"),
    ("msg_purchase_mock", "演示版本暂不支持购买"),
    ("lang_title", "语言设置"),
    ("privacy_title", "隐私中心"),
    ("agreement_title", "服务协议"),
    ("privacy_heading", "您的数据，由您掌控"),
    ("agreement_heading", "平台使用规则与版权声明"),
    ("grounding_loading", "正在智能检索最新协议..."),
    ("grounding_sources", "参考来源与链接"),
    ("grounding_default_source", "访问官方协议页面"),
    ("msg_grounding_empty", "无法加载内容，请稍后再试。"),
    ("msg_grounding_error", "获取信息时出错。请检查您的网络连接或稍后再试。"),
    ("label_contact_desc", "如有任何问题或建议，欢迎通过邮件与我们联系。"),
    ("label_official_email", "官方邮箱"),
    ("label_about_desc", "一款基于 AI 的动态头像生成应用。"),
    ("status_ready", "就绪"),
];

const EN_US: &[(&str, &str)] = &[
    ("app_name", "Dynamic Avatar"),
    ("splash_engine", "Starting AI engine"),
    ("tab_library", "Templates"),
    ("tab_assets", "My Assets"),
    ("tab_settings", "Settings"),
    ("label_all", "All"),
    ("label_hot", "Hot"),
    ("label_category_fresh", "Fresh"),
    ("label_category_dreamy", "Dreamy"),
    ("label_category_cyber", "Cyber"),
    ("label_category_school", "School"),
    ("label_category_aesthetic", "Aesthetic"),
    ("label_downloading", "Downloading"),
    ("label_dynamic", "Dynamic"),
    ("label_completed", "Completed"),
    ("label_processing", "Processing"),
    ("label_failed", "Failed"),
    ("label_original", "Original"),
    ("label_queueing", "Queued..."),
    ("label_fail_retry", "Generation failed, tap to retry"),
    ("label_empty", "Nothing here yet"),
    ("upload_title", "Upload Photo"),
    ("upload_hint", "For best results, upload a well-lit frontal photo with a clearly visible face."),
    ("upload_check_front", "Clear front view"),
    ("upload_check_dark", "Too dark"),
    ("upload_check_cover", "Face covered"),
    ("btn_start", "Start"),
    ("btn_creating", "Creating..."),
    ("modal_success_title", "Created"),
    ("modal_success_body", "Your {name} dynamic avatar is being made. Open My Assets to check on it."),
    ("btn_view_assets", "View My Assets"),
    ("btn_continue", "Keep Creating"),
    ("detail_title", "Dynamic Avatar"),
    ("label_live", "Live"),
    ("label_favorited", "Favorited"),
    ("label_not_favorited", "Not favorited"),
    ("delete_title", "Delete Asset"),
    ("confirm_delete", "Delete \"{name}\"?"),
    ("btn_confirm", "Confirm"),
    ("btn_cancel", "Cancel"),
    ("label_profile", "Profile"),
    ("label_coins", "Coins"),
    ("btn_recharge", "Top up"),
    ("label_legal", "Legal"),
    ("label_privacy", "Privacy Policy"),
    ("label_agreement", "User Agreement"),
    ("label_general", "General"),
    ("label_lang", "Language"),
    ("label_darkmode", "Dark Mode"),
    ("label_support", "Support"),
    ("label_contact", "Contact Us"),
    ("label_about", "About Us"),
    ("label_on", "On"),
    ("label_off", "Off"),
    ("profile_title", "Change Avatar"),
    ("btn_save_changes", "Save Changes"),
    ("label_pro_title", "Buy Coins"),
    ("label_pro_desc", "Use coins to unlock more dynamic templates"),
    ("label_coins_note", "Coins never expire. Buy again when they run out."),
    ("msg_purchase_mock", "Purchases are not available in this demo"),
    ("lang_title", "Language"),
    ("privacy_title", "Privacy Center"),
    ("agreement_title", "Terms of Service"),
    ("privacy_heading", "Your data, your control"),
    ("agreement_heading", "Platform rules and copyright"),
    ("grounding_loading", "Searching for the latest terms..."),
    ("grounding_sources", "Sources"),
    ("grounding_default_source", "Visit the official page"),
    ("msg_grounding_empty", "Unable to load content, please try again later."),
    ("msg_grounding_error", "Failed to fetch information. Check your network connection or try again later."),
    ("label_contact_desc", "Questions or suggestions? Reach us by e-mail."),
    ("label_official_email", "Official e-mail"),
    ("label_about_desc", "An AI-powered dynamic avatar generator."),
    ("status_ready", "Ready"),
];

fn table(locale: &str) -> Option<&'static [(&'static str, &'static str)]> {
    match locale {
        "zh-CN" => Some(ZH_CN),
        "en-US" => Some(EN_US),
        _ => None,
    }
}

fn lookup(table: &'static [(&'static str, &'static str)], key: &str) -> Option<&'static str> {
    table.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}

/// Translate `key` for `locale`.
pub fn t<'a>(locale: &str, key: &'a str) -> &'a str {
    let found: Option<&'static str> = table(locale)
        .and_then(|tbl| lookup(tbl, key))
        .or_else(|| lookup(ZH_CN, key));
    match found {
        Some(s) => s,
        None => key,
    }
}

/// Translate `key` and substitute `{name}`.
pub fn t_name(locale: &str, key: &str, name: &str) -> String {
    t(locale, key).replace("{name}", name)
}
