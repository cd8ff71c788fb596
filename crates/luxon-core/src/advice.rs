//! Static guidance texts shown alongside a reading.
//!
//! Recommendations follow the same comfort bands as [`crate::classify`], so
//! the advice never disagrees with the status message.

use luxon_types::LightCategory;

/// Title of the recommendations view.
pub const RECOMMENDATIONS_TITLE: &str = "Tavsiyeler";

/// Title of the information view.
pub const INFO_TITLE: &str = "Bilgilendirme";

/// Headline of the information view.
pub const INFO_HEADLINE: &str = "LUXON - Smart Light Assistant";

/// Body of the information view.
pub const INFO_BODY: &str = "LUXON, çalışma ortamınızdaki ışık seviyesini ölçerek göz sağlığınızı korumanıza yardımcı olur.\n\n\
İdeal ışık seviyeleri:\n\
• Çalışma için: 300-500 lux\n\
• Yetersiz: 150 lux altı\n\
• Çok parlak: 600 lux üstü\n\n\
Uygulama, cihazınızın ışık sensörünü kullanarak gerçek zamanlı ölçüm yapar.";

/// Title of the test mode view.
pub const TEST_MODE_TITLE: &str = "Test Modu";

/// Shown while test mode is on.
pub const TEST_MODE_ENABLED_HINT: &str =
    "Test modunda sensör devre dışı bırakılır ve manuel olarak ışık seviyesi ayarlanabilir.";

/// Shown while test mode is off.
pub const TEST_MODE_DISABLED_HINT: &str = "Test modunu açarak farklı ışık seviyelerini test edebilirsiniz. Sensör otomatik olarak devre dışı kalacaktır.";

const LOW_ADVICE: [&str; 3] = [
    "Işığı artırmak için pencereyi açın veya ek bir ışık kaynağı ekleyin",
    "Göz yorgunluğunu önlemek için yeterli aydınlatma önemlidir",
    "Çalışma masanızı daha aydınlık bir alana taşımayı düşünün",
];

const IDEAL_ADVICE: [&str; 3] = [
    "Mevcut aydınlatma seviyeniz idealdir",
    "Bu seviyeyi korumaya çalışın",
    "Düzenli olarak ışık seviyesini kontrol edin",
];

const HIGH_ADVICE: [&str; 3] = [
    "Işığı azaltmak için perdeleri kapatın veya ışık kaynaklarını kapatın",
    "Çok parlak ışık göz yorgunluğuna neden olabilir",
    "Çalışma masanızı daha az aydınlık bir alana taşımayı düşünün",
];

/// Recommendation bullets for a category.
pub fn recommendations(category: LightCategory) -> &'static [&'static str; 3] {
    match category {
        LightCategory::Low => &LOW_ADVICE,
        LightCategory::Ideal => &IDEAL_ADVICE,
        LightCategory::High => &HIGH_ADVICE,
    }
}

/// Header line of the recommendations view, e.g. `Mevcut ışık seviyesi: 312 lux`.
pub fn current_level_line(lux: f32) -> String {
    format!("Mevcut ışık seviyesi: {} lux", lux as i32)
}

/// Recommendations for a reading as bullet lines.
pub fn recommendation_lines(lux: f32) -> Vec<String> {
    recommendations(crate::classify::category(lux))
        .iter()
        .map(|line| format!("• {line}"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recommendations_follow_bands() {
        assert!(recommendation_lines(100.0)[0].contains("artırmak"));
        assert!(recommendation_lines(150.0)[0].contains("idealdir"));
        assert!(recommendation_lines(600.0)[0].contains("idealdir"));
        assert!(recommendation_lines(601.0)[0].contains("azaltmak"));
    }

    #[test]
    fn test_recommendation_lines_are_bulleted() {
        let lines = recommendation_lines(300.0);
        assert_eq!(lines.len(), 3);
        assert!(lines.iter().all(|l| l.starts_with("• ")));
    }

    #[test]
    fn test_current_level_line_truncates() {
        assert_eq!(current_level_line(312.9), "Mevcut ışık seviyesi: 312 lux");
        assert_eq!(current_level_line(0.0), "Mevcut ışık seviyesi: 0 lux");
    }

    #[test]
    fn test_info_body_lists_levels() {
        assert!(INFO_BODY.contains("300-500 lux"));
        assert!(INFO_BODY.contains("150 lux altı"));
        assert!(INFO_BODY.contains("600 lux üstü"));
    }
}
