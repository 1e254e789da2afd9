//! Static mock dataset used whenever the live pipeline cannot produce a result.
//!
//! The built-in catalog holds one dataset per face shape plus a generic
//! dataset for direct mode. It is built once and shared. A replacement
//! catalog can be loaded from TOML; it must be as complete as the built-in
//! one or it is rejected.

use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

use serde::{Deserialize, Serialize};

use hairfit_types::error::ConfigError;
use hairfit_types::face::{FaceShape, Gender};
use hairfit_types::suggestion::{RECOMMENDATION_COUNT, RecommendationRecord};

static BUILTIN: LazyLock<Arc<MockCatalog>> = LazyLock::new(|| Arc::new(MockCatalog::builtin_data()));

/// One canned result: summary, five records with static images, and the
/// gender used for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MockDataset {
    pub summary: String,
    pub records: Vec<RecommendationRecord>,
    #[serde(default)]
    pub gender: Gender,
}

impl MockDataset {
    fn validate(&self, key: &str) -> Result<(), ConfigError> {
        if self.summary.trim().is_empty() {
            return Err(ConfigError::Invalid(format!("mock dataset '{key}' has an empty summary")));
        }
        if self.records.len() != RECOMMENDATION_COUNT {
            return Err(ConfigError::Invalid(format!(
                "mock dataset '{key}' has {} records, expected {RECOMMENDATION_COUNT}",
                self.records.len()
            )));
        }
        if let Some(bad) = self
            .records
            .iter()
            .position(|r| !r.is_well_formed() || r.image_url.is_none())
        {
            return Err(ConfigError::Invalid(format!(
                "mock dataset '{key}' record {} needs a name, a description and an image_url",
                bad + 1
            )));
        }
        Ok(())
    }

    /// Mock images are never AI generated and never favorites.
    fn normalized(mut self) -> Self {
        for record in &mut self.records {
            record.is_ai_generated = false;
            record.is_favorite = false;
        }
        self
    }
}

/// Immutable catalog of mock datasets.
#[derive(Debug, Clone)]
pub struct MockCatalog {
    /// Indexed by `FaceShape as usize`, in `FaceShape::ALL` order.
    by_shape: [MockDataset; 7],
    direct: MockDataset,
}

#[derive(Deserialize)]
struct RawCatalog {
    direct: MockDataset,
    shapes: HashMap<String, MockDataset>,
}

impl MockCatalog {
    /// The shared built-in catalog.
    pub fn builtin() -> Arc<MockCatalog> {
        Arc::clone(&BUILTIN)
    }

    /// Parse a catalog from TOML.
    ///
    /// Layout: a `[direct]` table and one `[shapes.<shape>]` table per face
    /// shape, each with `summary`, optional `gender` and five `[[...records]]`.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let raw: RawCatalog = toml::from_str(source).map_err(|e| ConfigError::Parse {
            path: "mock catalog".to_string(),
            message: e.to_string(),
        })?;

        let mut shapes: HashMap<FaceShape, MockDataset> = HashMap::new();
        for (key, dataset) in raw.shapes {
            let shape: FaceShape = key.parse().map_err(ConfigError::Invalid)?;
            dataset.validate(shape.as_str())?;
            shapes.insert(shape, dataset.normalized());
        }

        raw.direct.validate("direct")?;

        let mut by_shape = Vec::with_capacity(FaceShape::ALL.len());
        for shape in FaceShape::ALL {
            let dataset = shapes.remove(&shape).ok_or_else(|| {
                ConfigError::Invalid(format!("mock catalog is missing face shape '{shape}'"))
            })?;
            by_shape.push(dataset);
        }
        let by_shape: [MockDataset; 7] = by_shape
            .try_into()
            .map_err(|_| ConfigError::Invalid("mock catalog shape table is malformed".to_string()))?;

        Ok(Self {
            by_shape,
            direct: raw.direct.normalized(),
        })
    }

    /// Dataset for a classified face shape.
    pub fn for_shape(&self, shape: FaceShape) -> &MockDataset {
        &self.by_shape[shape as usize]
    }

    /// Generic dataset for direct mode.
    pub fn direct(&self) -> &MockDataset {
        &self.direct
    }

    fn builtin_data() -> Self {
        Self {
            by_shape: [
                dataset(
                    "You have an oval face shape, which is considered the most versatile for \
                     hairstyles. Your face is about one and a half times longer than it is wide, \
                     with your forehead slightly wider than your jaw.",
                    1,
                    [
                        ("Classic Medium-Length Layers", "Layers that start at the chin and continue downward will frame your face beautifully while maintaining its natural balance."),
                        ("Textured Pixie Cut", "Your oval face shape can handle the shortness of a pixie cut. Add texture on top for some volume and style versatility."),
                        ("Long Layers with Side-Swept Bangs", "This style adds softness around your face while the side-swept bangs create a gentle frame."),
                        ("Modern Shag", "A shag haircut with lots of layers works well with your face shape, adding texture and movement."),
                        ("Sleek Bob", "A bob that hits at the jawline or slightly below complements your oval face shape by adding structure."),
                    ],
                ),
                dataset(
                    "You have a round face shape with soft angles and similar width and length \
                     measurements. Your cheekbones are the widest part of your face, with a \
                     rounded jawline and forehead.",
                    6,
                    [
                        ("Long Layered Cut", "Long layers create the illusion of length and help slim a round face."),
                        ("Side-Parted Bob", "An asymmetrical bob with a deep side part adds angles to soften roundness."),
                        ("Voluminous Pixie with Height", "Adding volume at the crown elongates your face shape and creates a balancing effect."),
                        ("Long Side-Swept Bangs", "Side-swept bangs create diagonal lines across your face, adding definition and angles."),
                        ("Shoulder-Length Cut with Face-Framing Layers", "Layers that start at the chin help create structure and lengthen a round face."),
                    ],
                ),
                dataset(
                    "You have a square face shape with a strong jawline and forehead that are \
                     approximately the same width. Your face has defined angles and a shorter \
                     length compared to width.",
                    11,
                    [
                        ("Soft Layered Cut", "Soft layers help balance the angularity of your square face shape."),
                        ("Wavy Lob (Long Bob)", "Waves add softness to counterbalance your strong jawline."),
                        ("Side-Swept Pixie", "A pixie cut with longer pieces on top softens your facial angles."),
                        ("Curtain Bangs", "These frame your face and soften the squareness of your forehead."),
                        ("Long Layers with Face-Framing Pieces", "Long layers starting below the chin soften your jawline."),
                    ],
                ),
                dataset(
                    "You have a heart-shaped face with a wider forehead that tapers to a narrower \
                     chin. Your cheekbones are typically high and well-defined.",
                    16,
                    [
                        ("Chin-Length Bob", "A bob that hits at the chin adds width to the lower part of your face, creating balance."),
                        ("Side-Parted Waves", "Waves with a side part add softness and balance to your features."),
                        ("Long Layers with Side-Swept Bangs", "Side-swept bangs soften your forehead while long layers add movement."),
                        ("Pixie with Longer Top", "A pixie cut with length on top balances your narrower chin."),
                        ("Medium Length with Curtain Bangs", "Curtain bangs soften your forehead while medium length adds balance."),
                    ],
                ),
                dataset(
                    "You have a diamond face shape with narrow forehead and jawline, and wider \
                     cheekbones. This creates distinctive angles and high definition in your face.",
                    21,
                    [
                        ("Textured Lob with Side Part", "A textured long bob with a side part softens your angular features while highlighting your cheekbones."),
                        ("Wispy Bangs", "Wispy bangs add width to your forehead while softening your overall look."),
                        ("Chin-Length Bob with Layers", "A layered bob adds width at your jawline, creating more balance with your cheekbones."),
                        ("Mid-Length Waves", "Soft waves at mid-length add volume at your jawline and forehead."),
                        ("Pixie with Textured Bangs", "A pixie cut with textured bangs adds width to your forehead while showing off your cheekbones."),
                    ],
                ),
                dataset(
                    "You have a rectangular face shape with a longer face and straight sides. \
                     Your forehead, cheekbones, and jawline are similar in width.",
                    26,
                    [
                        ("Layered Mid-Length Cut with Bangs", "Bangs shorten your face visually while layers add width to the sides."),
                        ("Voluminous Bob", "A bob with volume at the sides adds width to your face, creating better proportion."),
                        ("Shoulder-Length Waves", "Waves add width and texture while the length balances your face shape."),
                        ("Long Layers with Curtain Bangs", "Curtain bangs visually shorten your face while layers add softness."),
                        ("Textured Pixie with Full Bangs", "Full bangs shorten your face while texture adds width at the sides."),
                    ],
                ),
                dataset(
                    "You have an oblong face shape that is longer than it is wide, with minimal \
                     angles. Your forehead, cheekbones, and jawline are similar in width.",
                    31,
                    [
                        ("Full Bangs with Layers", "Full bangs shorten your face visually, while layers add width."),
                        ("Chin-Length Bob with Side-Swept Bangs", "This length adds width at your jawline while bangs break up the length of your face."),
                        ("Layered Shag with Curtain Bangs", "A shag haircut with curtain bangs adds width and texture throughout."),
                        ("Short Textured Pixie", "A pixie with texture on top adds width to counterbalance your face length."),
                        ("Medium Cut with Face-Framing Layers", "Face-framing layers starting at the cheekbones add width and dimension."),
                    ],
                ),
            ],
            direct: MockDataset {
                gender: Gender::Female,
                ..dataset(
                    "Таны зурагт үндэслэн хийсэн анализаар танд тохирох үсний загваруудыг санал болгож байна:",
                    1,
                    [
                        ("Орчин үеийн текстурт боб", "Текстурт боб үс таны нүүрийг гоёмсгоор хүрээлэн, үсэнд хөдөлгөөн болон хэмжээс нэмнэ. Текстурт давхарга нь орчин үеийн, хялбар загвар бөгөөд хялбархан засаж болно."),
                        ("Зөөлөн хөшиг баналтай үс", "Хөшиг баналт нь таны нүүрийг зөөлөн хүрээлж, төрхийг чинь тодотгоно. Энэ нь олон янзаар хэлбэржүүлж болох уян хатан загвар бөгөөд орчин үеийн харагдах төрхийг бий болгоно."),
                        ("Давхарласан дунд урттай үс", "Дунд урттай үсэнд нүүрийг хүрээлсэн үсний давхаргууд нь таны төрхийг тодруулж, шулуун болон давлагаатай гэх мэт янз бүрийн загварчлалын боломжийг олгодог."),
                        ("Дээд хэсэгтээ урт текстурт пикси", "Дээд хэсэгтээ нэмэлт уртай пикси үс таны нүүрний бүтцийг онцлон харуулж, орчин үеийн төрхийг бий болгоно. Энэ нь арчлахад хялбар боловч загварлаг харагдана."),
                        ("Зөөлөн долгионтой лоб", "Урт боб буюу лоб үс дээр зөөлөн долгион нь таны үсэнд хөдөлгөөн, хэмжээс нэмж, нүүрийг тань гоёмсгоор хүрээлнэ. Энэхүү олон талт загвар нь өдөр тутмын болон албан ёсны арга хэмжээнд тохиромжтой."),
                    ],
                )
            },
        }
    }
}

/// Build a dataset whose images are `example{first_image}.jpg` onwards.
fn dataset(
    summary: &str,
    first_image: usize,
    entries: [(&str, &str); RECOMMENDATION_COUNT],
) -> MockDataset {
    let records = entries
        .into_iter()
        .enumerate()
        .map(|(i, (name, description))| {
            RecommendationRecord::new(name, description)
                .with_static_image(format!("https://i.imgur.com/example{}.jpg", first_image + i))
        })
        .collect();

    MockDataset {
        summary: summary.to_string(),
        records,
        gender: Gender::Unspecified,
    }
}
