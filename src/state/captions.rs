/// Caption tables for the three galleries
///
/// The built-in tables ship with the binary. A `captions.json` file in the
/// media root can replace any of them:
///
/// ```json
/// { "covers": [ { "title": "Issue 01", "description": "..." } ] }
/// ```
use serde::Deserialize;
use std::fs;
use std::path::Path;

use super::data::{Caption, GalleryId};
use crate::error::Result;

/// Number of interior pages the built-in table captions
const PAGE_CAPTION_COUNT: usize = 87;

const PROJECT_CAPTIONS: &[(&str, &str)] = &[
    ("Banner - Featured Project", "Banner"),
    ("Billboard", "Billboard"),
    ("Illustration", "Illustration"),
    ("Fair/Showcase Organization Billboard", "Fair/Showcase Organization Billboard"),
    ("Print Magazine Design", "Print Magazine Design"),
    ("A page for the presentation of an agency", "A page for the presentation of an agency"),
    ("A page of a Technology magazine", "A page of a Technology magazine"),
    ("Application UI", "Application UI"),
    ("Promotion/Advertisement design", "Promotion/Advertisement design"),
    ("Web Design", "Web Design"),
    ("Many Logo Designs", "This is a mini-project that I had designed myself, depicting some of the brands that I worked for."),
    ("Magazine covers (for Envoy)", "These are all the covers that I had designed from scratch of the Envoy magazine."),
    ("Billboards for a fair organization.", "Billboards for a fair organization."),
    ("Billboards for a fair organization.", "Billboards for a fair organization."),
    ("Stuff Magazine Cover Design", "Print magazine"),
    ("BATHONEA flyer/brochure", "A brochure for BATHONEA"),
    ("Promotion/advertisement", "A promotion/advertisement for Blue Jade Construction Inc."),
    ("Business card design", "Business card for Blue Jade Construction Inc"),
    ("Business card design", "Business card for CARFORNIA.COM"),
    ("Bus stop shelter advertisement", "A bus shelter ad/promotion"),
    ("Envoy magazine covers & UI designs", "UI of envoymag.com and covers of multiple issues"),
    ("Magazine design showcase", "Showcase of magazine design skills."),
    ("Web & UI Design", "UI design along with a website design."),
    ("Business promotion design", "Design that promotes the business on various items."),
    ("Many logo designs", "Many logo designs."),
    ("Restaurant sign design", "Restaurant sign design."),
    ("Brochure", "A brochure design."),
    ("Business design", "A promotion design."),
    ("Business design", "Advertisement/packaging design for a printing press."),
    ("Many magazine designs", "Many magazine designs."),
    ("Drawing", "Digital collage sketchbook study of the Incredible Hulk."),
    ("YouTube profile picture design", "Profile picture design for a gaming channel."),
    ("Many logo designs", "Many logo designs."),
    ("Business card design", "A business card design."),
    ("Drawing", "Digital illustration mimicking Japanese woodblock prints."),
];

const COVER_CAPTIONS: &[(&str, &str)] = &[
    ("Envoy Magazine — Issue 01 Cover", "The debut issue establishing the visual identity and editorial direction of Envoy Magazine."),
    ("Envoy Magazine — Issue 02 Cover", "The second issue building the Envoy brand with refined design language and editorial presence."),
    ("Envoy Magazine — Issue 03 Cover", "Issue 03 exploring new visual territory with bold creative direction."),
    ("Envoy Magazine — Issue 04 Cover", "The fourth issue showcasing continued design evolution and brand maturity."),
    ("Envoy Magazine — Issue 05 Cover", "Issue 05 with growing sophistication in typography and visual composition."),
    ("Envoy Magazine — Issue 06 Cover", "Bold cover design with refined visual storytelling and impactful imagery."),
    ("Envoy Magazine — Issue 07 Cover", "The latest issue representing the pinnacle of Envoy's visual evolution."),
];

fn to_captions(table: &[(&str, &str)]) -> Vec<Caption> {
    table
        .iter()
        .map(|(title, description)| Caption::new(*title, *description))
        .collect()
}

/// Optional overrides read from `captions.json`
#[derive(Debug, Default, Deserialize)]
struct CaptionOverrides {
    projects: Option<Vec<Caption>>,
    covers: Option<Vec<Caption>>,
    pages: Option<Vec<Caption>>,
}

/// Per-gallery caption tables, index-aligned with gallery media
#[derive(Debug, Clone, PartialEq)]
pub struct CaptionTables {
    pub projects: Vec<Caption>,
    pub covers: Vec<Caption>,
    pub pages: Vec<Caption>,
}

impl Default for CaptionTables {
    fn default() -> Self {
        Self {
            projects: to_captions(PROJECT_CAPTIONS),
            covers: to_captions(COVER_CAPTIONS),
            pages: vec![Caption::new("Envoy", ""); PAGE_CAPTION_COUNT],
        }
    }
}

impl CaptionTables {
    pub fn for_gallery(&self, id: GalleryId) -> &[Caption] {
        match id {
            GalleryId::Projects => &self.projects,
            GalleryId::Covers => &self.covers,
            GalleryId::Pages => &self.pages,
        }
    }

    /// Load the built-in tables, replacing any that `captions.json` provides.
    /// A missing file is not an error.
    pub fn load(media_root: &Path) -> Result<Self> {
        let mut tables = Self::default();
        let path = media_root.join("captions.json");

        if !path.exists() {
            return Ok(tables);
        }

        let json = fs::read_to_string(&path)?;
        let overrides: CaptionOverrides = serde_json::from_str(&json)?;

        if let Some(projects) = overrides.projects {
            tables.projects = projects;
        }
        if let Some(covers) = overrides.covers {
            tables.covers = covers;
        }
        if let Some(pages) = overrides.pages {
            tables.pages = pages;
        }

        tracing::info!("📝 Loaded caption overrides from {}", path.display());
        Ok(tables)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_tables() {
        let tables = CaptionTables::default();
        assert_eq!(tables.covers.len(), 7);
        assert_eq!(tables.covers[6].title, "Envoy Magazine — Issue 07 Cover");
        assert_eq!(tables.pages.len(), PAGE_CAPTION_COUNT);
        assert_eq!(tables.pages[0].title, "Envoy");
        assert!(tables.pages[0].description.is_empty());
    }

    #[test]
    fn test_partial_override() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("captions.json"),
            r#"{ "covers": [ { "title": "Only cover" } ] }"#,
        )
        .unwrap();

        let tables = CaptionTables::load(dir.path()).unwrap();

        assert_eq!(tables.covers, vec![Caption::new("Only cover", "")]);
        assert_eq!(tables.projects, CaptionTables::default().projects);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let tables = CaptionTables::load(dir.path()).unwrap();
        assert_eq!(tables, CaptionTables::default());
    }
}
