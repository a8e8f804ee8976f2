//! Turkish shipping address normalization.
//!
//! Shopify checkouts routinely arrive with the il in the ilçe field, with
//! lowercase or ASCII-transliterated spellings, or with the district left
//! blank. The carrier rejects submissions without a province, so the
//! normalizer repairs what it can (swap, zip fallback) and fails fast,
//! before any network call, when no province can be recovered.

use aras_kargo_core::ShippingAddress;

use crate::error::ArasError;

/// The 81 Turkish provinces in folded form (lowercase, diacritics
/// stripped), so membership checks are case- and spelling-insensitive:
/// `Ağrı`, `AGRI` and `agri` all match.
const TURKISH_PROVINCES: &[&str] = &[
    "adana", "adiyaman", "afyonkarahisar", "agri", "amasya", "ankara", "antalya", "artvin",
    "aydin", "balikesir", "bilecik", "bingol", "bitlis", "bolu", "burdur", "bursa", "canakkale",
    "cankiri", "corum", "denizli", "diyarbakir", "edirne", "elazig", "erzincan", "erzurum",
    "eskisehir", "gaziantep", "giresun", "gumushane", "hakkari", "hatay", "isparta", "mersin",
    "istanbul", "izmir", "kars", "kastamonu", "kayseri", "kirklareli", "kirsehir", "kocaeli",
    "konya", "kutahya", "malatya", "manisa", "kahramanmaras", "mardin", "mugla", "mus",
    "nevsehir", "nigde", "ordu", "rize", "sakarya", "samsun", "siirt", "sinop", "sivas",
    "tekirdag", "tokat", "trabzon", "tunceli", "sanliurfa", "usak", "van", "yozgat", "zonguldak",
    "aksaray", "bayburt", "karaman", "kirikkale", "batman", "sirnak", "bartin", "ardahan",
    "igdir", "yalova", "karabuk", "kilis", "osmaniye", "duzce",
];

/// A province/district pair ready for the carrier, upper-cased with
/// Turkish letter rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedAddress {
    pub province: String,
    pub district: String,
}

/// Normalize the province and district of a shipping address.
///
/// Repair rules, in order:
/// 1. Province blank but the district names a known province: move the
///    district into the province slot and recover the district from the
///    zip table when possible.
/// 2. District blank and the zip is known: fill the district from the zip.
/// 3. Province still blank: fail.
///
/// On success both fields are upper-cased with Turkish rules
/// (`istanbul` becomes `İSTANBUL`, not `ISTANBUL`).
///
/// # Errors
///
/// Returns [`ArasError::MissingProvince`] when no province can be
/// recovered. Callers must not submit the shipment in that case.
pub fn normalize(address: &ShippingAddress) -> Result<NormalizedAddress, ArasError> {
    let mut province = address.province.trim().to_owned();
    let mut district = address.district.trim().to_owned();
    let zip = address.postal_code.as_deref().map(str::trim);

    if province.is_empty() && is_province(&district) {
        province = std::mem::take(&mut district);
        district = zip.and_then(district_from_zip).unwrap_or_default().to_owned();
    }

    if district.is_empty() && let Some(from_zip) = zip.and_then(district_from_zip) {
        district = from_zip.to_owned();
    }

    if province.is_empty() {
        return Err(ArasError::MissingProvince);
    }

    Ok(NormalizedAddress {
        province: to_upper_tr(&province),
        district: to_upper_tr(&district),
    })
}

/// Whether `value` names a Turkish province, ignoring case and diacritics.
fn is_province(value: &str) -> bool {
    if value.is_empty() {
        return false;
    }
    TURKISH_PROVINCES.contains(&fold_for_lookup(value).as_str())
}

/// Known zip prefixes for districts that checkouts leave blank most often.
fn district_from_zip(zip: &str) -> Option<&'static str> {
    match zip {
        "34197" => Some("Bahçelievler"),
        "34149" => Some("Bakırköy"),
        "34720" => Some("Kadıköy"),
        "34696" => Some("Üsküdar"),
        "34394" => Some("Şişli"),
        "34433" => Some("Beyoğlu"),
        "06420" => Some("Çankaya"),
        "35620" => Some("Karşıyaka"),
        "16110" => Some("Nilüfer"),
        _ => None,
    }
}

/// Fold a value for province lookup: Turkish-aware lowercasing plus
/// diacritic stripping, so `İzmir`, `IZMIR` and `izmir` compare equal.
fn fold_for_lookup(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.trim().chars() {
        match c {
            'I' | 'İ' | 'ı' => out.push('i'),
            'Ğ' | 'ğ' => out.push('g'),
            'Ü' | 'ü' => out.push('u'),
            'Ş' | 'ş' => out.push('s'),
            'Ö' | 'ö' => out.push('o'),
            'Ç' | 'ç' => out.push('c'),
            _ => out.extend(c.to_lowercase()),
        }
    }
    out
}

/// Upper-case with Turkish letter rules: `i` maps to `İ` and `ı` to `I`.
/// The stock `to_uppercase` would turn `istanbul` into `ISTANBUL`.
fn to_upper_tr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            'i' => out.push('İ'),
            'ı' => out.push('I'),
            _ => out.extend(c.to_uppercase()),
        }
    }
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn address(province: &str, district: &str, zip: Option<&str>) -> ShippingAddress {
        ShippingAddress {
            first_name: "Ayşe".to_owned(),
            last_name: "Yılmaz".to_owned(),
            address1: "Bağdat Cad. No:1".to_owned(),
            address2: None,
            district: district.to_owned(),
            province: province.to_owned(),
            phone: "+905551112233".to_owned(),
            postal_code: zip.map(ToOwned::to_owned),
        }
    }

    #[test]
    fn test_lowercase_province_uppercased_with_turkish_rules() {
        let normalized = normalize(&address("istanbul", "kadıköy", None)).unwrap();
        assert_eq!(normalized.province, "İSTANBUL");
        assert_eq!(normalized.district, "KADIKÖY");
    }

    #[test]
    fn test_province_in_district_slot_is_swapped() {
        let normalized = normalize(&address("", "İstanbul", Some("34720"))).unwrap();
        assert_eq!(normalized.province, "İSTANBUL");
        assert_eq!(normalized.district, "KADIKÖY");
    }

    #[test]
    fn test_swap_without_known_zip_leaves_district_empty() {
        let normalized = normalize(&address("", "Ankara", Some("06999"))).unwrap();
        assert_eq!(normalized.province, "ANKARA");
        assert_eq!(normalized.district, "");
    }

    #[test]
    fn test_blank_district_filled_from_zip() {
        let normalized = normalize(&address("İstanbul", "", Some("34394"))).unwrap();
        assert_eq!(normalized.district, "ŞİŞLİ");
    }

    #[test]
    fn test_missing_province_fails() {
        assert!(matches!(
            normalize(&address("", "Merkez Mah.", None)),
            Err(ArasError::MissingProvince)
        ));
        assert!(matches!(
            normalize(&address("   ", "", Some("99999"))),
            Err(ArasError::MissingProvince)
        ));
    }

    #[test]
    fn test_is_province_ignores_case_and_diacritics() {
        assert!(is_province("Ağrı"));
        assert!(is_province("AGRI"));
        assert!(is_province("agri"));
        assert!(is_province("Şanlıurfa"));
        assert!(is_province("SANLIURFA"));
        assert!(is_province("İZMİR"));
        assert!(is_province("izmir"));
        assert!(!is_province("Kadıköy"));
        assert!(!is_province(""));
    }

    #[test]
    fn test_province_count() {
        assert_eq!(TURKISH_PROVINCES.len(), 81);
    }

    #[test]
    fn test_to_upper_tr() {
        assert_eq!(to_upper_tr("istanbul"), "İSTANBUL");
        assert_eq!(to_upper_tr("ırmak"), "IRMAK");
        assert_eq!(to_upper_tr("çiğli"), "ÇİĞLİ");
    }

    #[test]
    fn test_good_address_passes_through_uppercased() {
        let normalized = normalize(&address("İstanbul", "Üsküdar", Some("34696"))).unwrap();
        assert_eq!(normalized.province, "İSTANBUL");
        assert_eq!(normalized.district, "ÜSKÜDAR");
    }
}
