//! Class index to label mapping and per-disease guidance.

pub const UNKNOWN_LABEL: &str = "Unknown";

/// Output order of the classifier head.
pub const CLASS_LABELS: [&str; 11] = [
    "Bacterial_spot",
    "Early_blight",
    "Late_blight",
    "Leaf_Mold",
    "Septoria_leaf_spot",
    "Spider_mites Two-spotted_spider_mite",
    "Target_Spot",
    "Tomato_Yellow_Leaf_Curl_Virus",
    "Tomato_mosaic_virus",
    "healthy",
    "powdery_mildew",
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiseaseInfo {
    pub cause: &'static str,
    pub prevention: &'static str,
}

const UNKNOWN_INFO: DiseaseInfo = DiseaseInfo {
    cause: UNKNOWN_LABEL,
    prevention: UNKNOWN_LABEL,
};

pub fn label_for(index: usize) -> &'static str {
    CLASS_LABELS.get(index).copied().unwrap_or(UNKNOWN_LABEL)
}

pub fn disease_info(label: &str) -> DiseaseInfo {
    let (cause, prevention) = match label {
        "Bacterial_spot" => (
            "Caused by the bacterium Xanthomonas campestris pv. vesicatoria.",
            "Use disease-free seeds, rotate crops, and apply copper-based bactericides.",
        ),
        "Early_blight" => (
            "Caused by the fungus Alternaria solani.",
            "Remove infected plant debris, use resistant varieties, and apply fungicides.",
        ),
        "Late_blight" => (
            "Caused by the oomycete Phytophthora infestans.",
            "Avoid overhead watering, remove infected plants, and use fungicides.",
        ),
        "Leaf_Mold" => (
            "Caused by the fungus Passalora fulva.",
            "Improve air circulation, avoid wetting leaves, and apply fungicides.",
        ),
        "Septoria_leaf_spot" => (
            "Caused by the fungus Septoria lycopersici.",
            "Remove infected leaves, rotate crops, and apply fungicides.",
        ),
        "Spider_mites Two-spotted_spider_mite" => (
            "Caused by the mite Tetranychus urticae.",
            "Use miticides, encourage natural predators, and avoid plant stress.",
        ),
        "Target_Spot" => (
            "Caused by the fungus Corynespora cassiicola.",
            "Remove plant debris, rotate crops, and apply fungicides.",
        ),
        "Tomato_Yellow_Leaf_Curl_Virus" => (
            "Caused by Tomato yellow leaf curl virus transmitted by whiteflies.",
            "Control whiteflies, use resistant varieties, and remove infected plants.",
        ),
        "Tomato_mosaic_virus" => (
            "Caused by Tomato mosaic virus.",
            "Use virus-free seeds, disinfect tools, and remove infected plants.",
        ),
        "healthy" => (
            "No disease detected.",
            "Maintain good cultural practices to keep plants healthy.",
        ),
        "powdery_mildew" => (
            "Caused by several fungal species including Oidium neolycopersici.",
            "Improve air circulation, avoid overcrowding, \
             apply sulfur or potassium bicarbonate fungicides.",
        ),
        _ => return UNKNOWN_INFO,
    };

    DiseaseInfo { cause, prevention }
}
