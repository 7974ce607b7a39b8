use lazy_static::lazy_static;
use std::env;

/// `locales/` 目录下提供的语言
pub const SUPPORTED_LOCALES: [&str; 2] = ["en", "zh"];

pub const DEFAULT_LOCALE: &str = "en";

lazy_static! {
    // 获取当前语言环境，依次检查 LC_ALL、LC_MESSAGES、LANG
    static ref LANG: String = ["LC_ALL", "LC_MESSAGES", "LANG"]
        .iter()
        .filter_map(|var| env::var(var).ok())
        .find(|value| !value.is_empty())
        .map(|value| locale_from(&value))
        .unwrap_or_else(|| DEFAULT_LOCALE.to_string());
}

/// 将 `zh_CN.UTF-8` 这类 POSIX 语言环境映射为已提供的语言
///
/// 不支持的语言回退为英语
pub fn locale_from(value: &str) -> String {
    let lang = value
        .split(['_', '.', '@', '-'])
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase();

    if SUPPORTED_LOCALES.contains(&lang.as_str()) {
        lang
    } else {
        DEFAULT_LOCALE.to_string()
    }
}

/// 初始化国际化设置
///
/// 根据检测到的语言环境设置当前 locale，应在程序启动时尽早调用。
pub fn setup_i18n() {
    rust_i18n::set_locale(&LANG);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn posix_locales_are_normalized() {
        assert_eq!(locale_from("zh_CN.UTF-8"), "zh");
        assert_eq!(locale_from("en_US.UTF-8"), "en");
        assert_eq!(locale_from("EN"), "en");
    }

    #[test]
    fn unsupported_locales_fall_back_to_english() {
        assert_eq!(locale_from("C"), "en");
        assert_eq!(locale_from("POSIX"), "en");
        assert_eq!(locale_from("fr_FR.UTF-8"), "en");
    }
}
