//! The fixed-schema patient record consumed by the scoring service.
//!
//! The record carries exactly the 14 parameters the classifier was trained
//! on. Field order and column names are part of the model contract and must
//! never drift from [`FEATURE_COLUMNS`].

/// Training-time column names, in training-time order.
///
/// The classifier receives feature rows assembled in exactly this order and
/// the model artifact must declare these names verbatim. Reordering any two
/// entries silently corrupts every prediction, which is why assembly lives
/// in one place ([`PatientRecord::feature_row`]).
pub const FEATURE_COLUMNS: [&str; 14] = [
    "WBC",
    "CRP",
    "IL6",
    "PCT",
    "Elderly",
    "Disease type",
    "Fever status",
    "Restricted antimicrobial use",
    "Urinary catheterization",
    "Special-class antimicrobial use",
    "Antimicrobial use",
    "Bacterial infection",
    "Combination antimicrobial therapy",
    "Central venous catheter (CVC)",
];

/// Disease category of the current admission.
///
/// The numeric codes come from the upstream training data. Code 5 is absent
/// there (reserved or a gap in the source registry, the training pipeline
/// does not say); the gap is preserved rather than renumbered, so 5 is a
/// rejected code.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DiseaseType {
    /// Other/unclassified conditions.
    Others,
    /// Respiratory disease.
    Respiratory,
    /// Tumour.
    Tumour,
    /// Gynecological disease.
    Gynecological,
    /// Orthopedics and trauma.
    OrthopedicsAndTrauma,
    /// Cardiovascular disease.
    Cardiovascular,
    /// Nervous system disease.
    NervousSystem,
    /// Digestive system disease.
    Digestive,
    /// Metabolic disease.
    Metabolic,
    /// Urinary system disease.
    Urinary,
    /// Infectious disease.
    Infectious,
    /// Otorhinolaryngological disease.
    Otorhinolaryngological,
    /// Ophthalmic disease.
    Ophthalmic,
    /// Dermatological disease.
    Dermatological,
    /// Hematological disease.
    Hematological,
    /// Rehabilitation.
    Rehabilitation,
    /// Intensive care.
    IntensiveCare,
    /// Geriatrics.
    Geriatrics,
    /// General medicine.
    GeneralMedicine,
    /// Traditional Chinese Medicine and general medicine.
    TcmAndGeneralMedicine,
}

impl DiseaseType {
    /// Parse from the numeric code used in the training data.
    ///
    /// Returns `None` for unknown codes, including the absent code 5.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(DiseaseType::Others),
            1 => Some(DiseaseType::Respiratory),
            2 => Some(DiseaseType::Tumour),
            3 => Some(DiseaseType::Gynecological),
            4 => Some(DiseaseType::OrthopedicsAndTrauma),
            // 5 is absent from the training data and stays rejected.
            6 => Some(DiseaseType::Cardiovascular),
            7 => Some(DiseaseType::NervousSystem),
            8 => Some(DiseaseType::Digestive),
            9 => Some(DiseaseType::Metabolic),
            10 => Some(DiseaseType::Urinary),
            11 => Some(DiseaseType::Infectious),
            12 => Some(DiseaseType::Otorhinolaryngological),
            13 => Some(DiseaseType::Ophthalmic),
            14 => Some(DiseaseType::Dermatological),
            15 => Some(DiseaseType::Hematological),
            16 => Some(DiseaseType::Rehabilitation),
            17 => Some(DiseaseType::IntensiveCare),
            18 => Some(DiseaseType::Geriatrics),
            19 => Some(DiseaseType::GeneralMedicine),
            20 => Some(DiseaseType::TcmAndGeneralMedicine),
            _ => None,
        }
    }

    /// The numeric code the classifier was trained on.
    pub fn code(self) -> u8 {
        match self {
            DiseaseType::Others => 0,
            DiseaseType::Respiratory => 1,
            DiseaseType::Tumour => 2,
            DiseaseType::Gynecological => 3,
            DiseaseType::OrthopedicsAndTrauma => 4,
            DiseaseType::Cardiovascular => 6,
            DiseaseType::NervousSystem => 7,
            DiseaseType::Digestive => 8,
            DiseaseType::Metabolic => 9,
            DiseaseType::Urinary => 10,
            DiseaseType::Infectious => 11,
            DiseaseType::Otorhinolaryngological => 12,
            DiseaseType::Ophthalmic => 13,
            DiseaseType::Dermatological => 14,
            DiseaseType::Hematological => 15,
            DiseaseType::Rehabilitation => 16,
            DiseaseType::IntensiveCare => 17,
            DiseaseType::Geriatrics => 18,
            DiseaseType::GeneralMedicine => 19,
            DiseaseType::TcmAndGeneralMedicine => 20,
        }
    }

    /// Display label for the category.
    pub fn label(self) -> &'static str {
        match self {
            DiseaseType::Others => "Others",
            DiseaseType::Respiratory => "Respiratory disease",
            DiseaseType::Tumour => "Tumour",
            DiseaseType::Gynecological => "Gynecological disease",
            DiseaseType::OrthopedicsAndTrauma => "Orthopedics and trauma",
            DiseaseType::Cardiovascular => "Cardiovascular disease",
            DiseaseType::NervousSystem => "Nervous system disease",
            DiseaseType::Digestive => "Digestive system disease",
            DiseaseType::Metabolic => "Metabolic disease",
            DiseaseType::Urinary => "Urinary system disease",
            DiseaseType::Infectious => "Infectious disease",
            DiseaseType::Otorhinolaryngological => "Otorhinolaryngological disease",
            DiseaseType::Ophthalmic => "Ophthalmic disease",
            DiseaseType::Dermatological => "Dermatological disease",
            DiseaseType::Hematological => "Hematological disease",
            DiseaseType::Rehabilitation => "Rehabilitation",
            DiseaseType::IntensiveCare => "Intensive care",
            DiseaseType::Geriatrics => "Geriatrics",
            DiseaseType::GeneralMedicine => "General medicine",
            DiseaseType::TcmAndGeneralMedicine => {
                "Traditional Chinese Medicine and general medicine"
            }
        }
    }
}

/// A single patient's laboratory and clinical parameters.
///
/// Immutable input to one scoring call. Boolean and categorical fields are
/// valid by construction; the laboratory values are range-checked by
/// [`crate::validation::validate_record`] before any classifier call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PatientRecord {
    /// White blood cell count, 10^9/L. Valid domain 0.0..=50.0.
    pub wbc: f64,
    /// C-reactive protein, mg/L. Valid domain 0.0..=500.0.
    pub crp: f64,
    /// Interleukin-6, pg/mL. Valid domain 0.0..=1000.0.
    pub il6: f64,
    /// Procalcitonin, ng/mL. Valid domain 0.0..=100.0.
    pub pct: f64,
    /// Patient is 65 or older.
    pub elderly: bool,
    /// Disease category of the current admission.
    pub disease_type: DiseaseType,
    /// Patient is currently febrile.
    pub fever_status: bool,
    /// Restricted-class antimicrobials in use.
    pub restricted_antimicrobial_use: bool,
    /// Urinary catheter in place.
    pub urinary_catheterization: bool,
    /// Special-class antimicrobials in use.
    pub special_class_antimicrobial_use: bool,
    /// Any antimicrobial in use.
    pub antimicrobial_use: bool,
    /// Confirmed bacterial infection.
    pub bacterial_infection: bool,
    /// Two or more antimicrobials in combination.
    pub combination_antimicrobial_therapy: bool,
    /// Central venous catheter in place.
    pub central_venous_catheter: bool,
}

impl PatientRecord {
    /// Assembles the classifier feature row in training-time column order.
    ///
    /// This is the only place record fields are flattened to numbers; the
    /// positions correspond one-to-one with [`FEATURE_COLUMNS`].
    pub fn feature_row(&self) -> [f64; 14] {
        [
            self.wbc,
            self.crp,
            self.il6,
            self.pct,
            f64::from(u8::from(self.elderly)),
            f64::from(self.disease_type.code()),
            f64::from(u8::from(self.fever_status)),
            f64::from(u8::from(self.restricted_antimicrobial_use)),
            f64::from(u8::from(self.urinary_catheterization)),
            f64::from(u8::from(self.special_class_antimicrobial_use)),
            f64::from(u8::from(self.antimicrobial_use)),
            f64::from(u8::from(self.bacterial_infection)),
            f64::from(u8::from(self.combination_antimicrobial_therapy)),
            f64::from(u8::from(self.central_venous_catheter)),
        ]
    }
}
