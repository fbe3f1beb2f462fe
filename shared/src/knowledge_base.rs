use serde::Serialize;
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

/// Labels the inference service is known to return.
///
/// The string form of each variant is the exact wire label, so parsing is
/// case sensitive: `"healthy"` is not a known label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, Display, EnumIter, AsRefStr)]
pub enum DiseaseLabel {
    #[strum(serialize = "Bacterial_spot")]
    BacterialSpot,
    #[strum(serialize = "Healthy")]
    Healthy,
    #[strum(serialize = "Septoria_leaf_spot")]
    SeptoriaLeafSpot,
    #[strum(serialize = "Spider_mites_Two_spotted_spider_mite")]
    SpiderMites,
    #[strum(serialize = "YellowLeaf__Curl_Virus")]
    YellowLeafCurlVirus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DiseaseInfo {
    pub causes: &'static str,
    pub treatments: &'static str,
}

const BACTERIAL_SPOT: DiseaseInfo = DiseaseInfo {
    causes: "Bacteria from the Xanthomonas genus (X. vesicatoria, X. euvesicatoria, X. gardneri, X. perforans).\n\nFavored by high temperatures (75°F to 86°F), high humidity, and frequent rainfall/overhead irrigation.",
    treatments: "Use certified disease-free seeds and disease-free transplants.\n\nImplement crop rotation and avoid planting tomatoes or peppers in the same soil for at least 3-4 years.",
};

const HEALTHY: DiseaseInfo = DiseaseInfo {
    causes: "No disease detected.",
    treatments: "Maintain general good practices including proper spacing, watering, and fertilization.",
};

const SEPTORIA_LEAF_SPOT: DiseaseInfo = DiseaseInfo {
    causes: "Caused by the fungus Septoria lycopersici.\n\nFavors wet, humid conditions and spreads through water splashes from rain or irrigation.",
    treatments: "Remove and destroy affected leaves to reduce the spread of the fungus.\n\nUse fungicides like chlorothalonil or mancozeb as a preventive measure.\n\nEnsure good air circulation by proper spacing of plants and staking.",
};

const SPIDER_MITES: DiseaseInfo = DiseaseInfo {
    causes: "Caused by Tetranychus urticae, which thrives in hot, dry conditions.",
    treatments: "Regularly spray plants with water to keep humidity high and dislodge mites.\n\nUse miticides or insecticidal soaps specifically labeled for spider mites.\n\nIntroduce natural predators like ladybugs or predatory mites.",
};

const YELLOW_LEAF_CURL_VIRUS: DiseaseInfo = DiseaseInfo {
    causes: "Transmitted by the whitefly (Bemisia tabaci).\n\nFavored by warm weather and high whitefly populations.",
    treatments: "Use whitefly-resistant tomato varieties.\n\nControl whitefly populations with insecticidal soaps, neem oil, or yellow sticky traps.\n\nRemove and destroy infected plants to prevent the spread of the virus.",
};

impl DiseaseLabel {
    pub const fn info(self) -> &'static DiseaseInfo {
        match self {
            DiseaseLabel::BacterialSpot => &BACTERIAL_SPOT,
            DiseaseLabel::Healthy => &HEALTHY,
            DiseaseLabel::SeptoriaLeafSpot => &SEPTORIA_LEAF_SPOT,
            DiseaseLabel::SpiderMites => &SPIDER_MITES,
            DiseaseLabel::YellowLeafCurlVirus => &YELLOW_LEAF_CURL_VIRUS,
        }
    }

    pub const fn display_name(self) -> &'static str {
        match self {
            DiseaseLabel::BacterialSpot => "Bacterial spot",
            DiseaseLabel::Healthy => "Healthy",
            DiseaseLabel::SeptoriaLeafSpot => "Septoria leaf spot",
            DiseaseLabel::SpiderMites => "Two-spotted spider mite",
            DiseaseLabel::YellowLeafCurlVirus => "Yellow leaf curl virus",
        }
    }
}

/// Resolves a wire label to its causes and treatments.
///
/// Labels outside the known set resolve to `None`; that means "nothing to
/// display", not a failure.
pub fn lookup(label: &str) -> Option<&'static DiseaseInfo> {
    label.parse::<DiseaseLabel>().ok().map(DiseaseLabel::info)
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn every_known_label_round_trips_through_its_wire_form() {
        let wire: Vec<String> = DiseaseLabel::iter().map(|label| label.to_string()).collect();
        assert_eq!(
            wire,
            [
                "Bacterial_spot",
                "Healthy",
                "Septoria_leaf_spot",
                "Spider_mites_Two_spotted_spider_mite",
                "YellowLeaf__Curl_Virus",
            ]
        );
        for label in DiseaseLabel::iter() {
            assert_eq!(label.to_string().parse::<DiseaseLabel>(), Ok(label));
            assert_eq!(lookup(label.as_ref()), Some(label.info()));
        }
    }

    #[test]
    fn healthy_record_is_verbatim() {
        let info = lookup("Healthy").expect("Healthy is a known label");
        assert_eq!(info.causes, "No disease detected.");
        assert_eq!(
            info.treatments,
            "Maintain general good practices including proper spacing, watering, and fertilization."
        );
    }

    #[test]
    fn unknown_labels_have_no_record() {
        for label in ["", "healthy", "HEALTHY", "Late_blight", " Healthy", "Bacterial spot"] {
            assert_eq!(lookup(label), None, "{label:?} should not resolve");
        }
    }

    #[test]
    fn records_keep_paragraph_breaks() {
        let info = DiseaseLabel::SeptoriaLeafSpot.info();
        assert_eq!(info.treatments.split("\n\n").count(), 3);
        assert!(info.causes.starts_with("Caused by the fungus Septoria lycopersici."));
    }
}
