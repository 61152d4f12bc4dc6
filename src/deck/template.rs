//! Presentation template module.
//!
//! Provides the minimal set of parts every valid .pptx needs besides the slides
//! themselves: one slide master, the layouts in [`Layout`], a theme and the
//! presentation-level property parts. Placeholder geometry is derived from the
//! template's slide size, so the same parts serve 4:3 and 16:9 decks.
use std::fmt::Write as FmtWrite;

use serde::{Deserialize, Serialize};

use crate::common::xml::escape_xml;
use crate::common::{Length, Result};
use crate::position::{Placement, Size};

use super::slide::Layout;

const NS_A: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
const NS_R: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const NS_P: &str = "http://schemas.openxmlformats.org/presentationml/2006/main";

/// Built-in slide formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateKind {
    /// 10" x 7.5" (4:3)
    #[default]
    Standard,
    /// 13.333" x 7.5" (16:9)
    Widescreen,
}

/// Slide size and theme fonts of a new presentation.
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    name: String,
    slide_size: Size,
    major_font: String,
    minor_font: String,
}

impl Default for Template {
    fn default() -> Self {
        Self::from_kind(TemplateKind::default())
    }
}

impl From<TemplateKind> for Template {
    fn from(kind: TemplateKind) -> Self {
        Self::from_kind(kind)
    }
}

impl Template {
    pub fn from_kind(kind: TemplateKind) -> Self {
        let width = match kind {
            TemplateKind::Standard => Length::from_emus(9_144_000),
            TemplateKind::Widescreen => Length::from_emus(12_192_000),
        };
        Self {
            name: "Office Theme".to_string(),
            slide_size: Size::new(width, Length::from_emus(6_858_000)),
            major_font: "Calibri Light".to_string(),
            minor_font: "Calibri".to_string(),
        }
    }

    /// A template with a custom slide size.
    pub fn with_slide_size(mut self, size: Size) -> Self {
        self.slide_size = size;
        self
    }

    /// Theme fonts used where no explicit font is set (headings, body).
    pub fn with_theme_fonts(mut self, major: impl Into<String>, minor: impl Into<String>) -> Self {
        self.major_font = major.into();
        self.minor_font = minor.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn slide_size(&self) -> Size {
        self.slide_size
    }

    pub fn major_font(&self) -> &str {
        &self.major_font
    }

    pub fn minor_font(&self) -> &str {
        &self.minor_font
    }

    /// Geometry of the title placeholder on regular slides.
    fn title_area(&self) -> Placement {
        self.area(0.0625, 0.0533, 0.875, 0.1944)
    }

    /// Geometry of the body placeholder on the master.
    fn body_area(&self) -> Placement {
        self.area(0.0625, 0.2667, 0.875, 0.6348)
    }

    fn center_title_area(&self) -> Placement {
        self.area(0.125, 0.1637, 0.75, 0.3481)
    }

    fn subtitle_area(&self) -> Placement {
        self.area(0.125, 0.5252, 0.75, 0.2414)
    }

    fn area(&self, left: f64, top: f64, width: f64, height: f64) -> Placement {
        let Size { width: w, height: h } = self.slide_size;
        Placement::new(w.scale(left), h.scale(top), w.scale(width), h.scale(height))
    }
}

fn write_group_root(xml: &mut String) {
    xml.push_str(r#"<p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr>"#);
    xml.push_str(r#"<p:grpSpPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="0" cy="0"/>"#);
    xml.push_str(r#"<a:chOff x="0" y="0"/><a:chExt cx="0" cy="0"/></a:xfrm></p:grpSpPr>"#);
}

struct PlaceholderSpec<'a> {
    id: u32,
    name: &'a str,
    ph: &'a str,
    area: Placement,
    body_pr: &'a str,
    lst_style: &'a str,
    prompt: &'a str,
}

fn write_placeholder(xml: &mut String, spec: &PlaceholderSpec<'_>) -> Result<()> {
    write!(
        xml,
        r#"<p:sp><p:nvSpPr><p:cNvPr id="{}" name="{}"/><p:cNvSpPr><a:spLocks noGrp="1"/></p:cNvSpPr><p:nvPr>{}</p:nvPr></p:nvSpPr>"#,
        spec.id, spec.name, spec.ph
    )?;
    write!(
        xml,
        r#"<p:spPr><a:xfrm><a:off x="{}" y="{}"/><a:ext cx="{}" cy="{}"/></a:xfrm><a:prstGeom prst="rect"><a:avLst/></a:prstGeom></p:spPr>"#,
        spec.area.left.emus(),
        spec.area.top.emus(),
        spec.area.width.emus(),
        spec.area.height.emus()
    )?;
    write!(
        xml,
        r#"<p:txBody>{}{}<a:p><a:r><a:rPr lang="en-US"/><a:t>{}</a:t></a:r><a:endParaRPr lang="en-US"/></a:p></p:txBody></p:sp>"#,
        spec.body_pr, spec.lst_style, spec.prompt
    )?;
    Ok(())
}

const TITLE_PROMPT: &str = "Click to edit Master title style";
const BODY_PROMPT: &str = "Click to edit Master text styles";
const SUBTITLE_PROMPT: &str = "Click to edit Master subtitle style";

fn level_style(tag: &str, size: u32, attrs: &str, extra: &str, font: &str) -> String {
    format!(
        r#"<a:{tag} {attrs}>{extra}<a:defRPr sz="{size}" kern="1200"><a:solidFill><a:schemeClr val="tx1"/></a:solidFill><a:latin typeface="+{font}-lt"/><a:ea typeface="+{font}-ea"/><a:cs typeface="+{font}-cs"/></a:defRPr></a:{tag}>"#
    )
}

/// Generate slideMaster1.xml.
///
/// `layout_count` layouts are listed with relationship IDs `rId1..=rIdN`.
pub fn slide_master_xml(template: &Template, layout_count: usize) -> Result<String> {
    let mut xml = String::with_capacity(4096);
    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    write!(xml, r#"<p:sldMaster xmlns:a="{NS_A}" xmlns:r="{NS_R}" xmlns:p="{NS_P}">"#)?;
    xml.push_str(r#"<p:cSld><p:bg><p:bgRef idx="1001"><a:schemeClr val="bg1"/></p:bgRef></p:bg><p:spTree>"#);
    write_group_root(&mut xml);
    write_placeholder(
        &mut xml,
        &PlaceholderSpec {
            id: 2,
            name: "Title Placeholder 1",
            ph: r#"<p:ph type="title"/>"#,
            area: template.title_area(),
            body_pr: r#"<a:bodyPr vert="horz" lIns="91440" tIns="45720" rIns="91440" bIns="45720" rtlCol="0" anchor="ctr"><a:normAutofit/></a:bodyPr>"#,
            lst_style: "<a:lstStyle/>",
            prompt: TITLE_PROMPT,
        },
    )?;
    write_placeholder(
        &mut xml,
        &PlaceholderSpec {
            id: 3,
            name: "Text Placeholder 2",
            ph: r#"<p:ph type="body" idx="1"/>"#,
            area: template.body_area(),
            body_pr: r#"<a:bodyPr vert="horz" lIns="91440" tIns="45720" rIns="91440" bIns="45720" rtlCol="0"><a:normAutofit/></a:bodyPr>"#,
            lst_style: "<a:lstStyle/>",
            prompt: BODY_PROMPT,
        },
    )?;
    xml.push_str("</p:spTree></p:cSld>");
    xml.push_str(r#"<p:clrMap bg1="lt1" tx1="dk1" bg2="lt2" tx2="dk2" accent1="accent1" accent2="accent2" accent3="accent3" accent4="accent4" accent5="accent5" accent6="accent6" hlink="hlink" folHlink="folHlink"/>"#);

    xml.push_str("<p:sldLayoutIdLst>");
    for index in 0..layout_count {
        write!(
            xml,
            r#"<p:sldLayoutId id="{}" r:id="rId{}"/>"#,
            2_147_483_649u64 + index as u64,
            index + 1
        )?;
    }
    xml.push_str("</p:sldLayoutIdLst>");

    xml.push_str("<p:txStyles><p:titleStyle>");
    xml.push_str(&level_style(
        "lvl1pPr",
        4400,
        r#"algn="l" defTabSz="914400" rtl="0" eaLnBrk="1" latinLnBrk="0" hangingPunct="1""#,
        r#"<a:lnSpc><a:spcPct val="90000"/></a:lnSpc><a:spcBef><a:spcPct val="0"/></a:spcBef><a:buNone/>"#,
        "mj",
    ));
    xml.push_str("</p:titleStyle><p:bodyStyle>");
    xml.push_str(&level_style(
        "lvl1pPr",
        2800,
        r#"marL="228600" indent="-228600" algn="l" defTabSz="914400" rtl="0" eaLnBrk="1" latinLnBrk="0" hangingPunct="1""#,
        r#"<a:lnSpc><a:spcPct val="90000"/></a:lnSpc><a:spcBef><a:spcPts val="1000"/></a:spcBef><a:buFont typeface="Arial"/><a:buChar char="&#8226;"/>"#,
        "mn",
    ));
    xml.push_str("</p:bodyStyle><p:otherStyle>");
    xml.push_str(r#"<a:defPPr><a:defRPr lang="en-US"/></a:defPPr>"#);
    xml.push_str(&level_style(
        "lvl1pPr",
        1800,
        r#"marL="0" algn="l" defTabSz="914400" rtl="0" eaLnBrk="1" latinLnBrk="0" hangingPunct="1""#,
        "",
        "mn",
    ));
    xml.push_str("</p:otherStyle></p:txStyles></p:sldMaster>");
    Ok(xml)
}

/// Generate the slide layout part for `layout`.
pub fn slide_layout_xml(template: &Template, layout: Layout) -> Result<String> {
    let layout_type = match layout {
        Layout::TitleSlide => "title",
        Layout::TitleOnly => "titleOnly",
        Layout::Blank => "blank",
    };
    let mut xml = String::with_capacity(2048);
    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    write!(
        xml,
        r#"<p:sldLayout xmlns:a="{NS_A}" xmlns:r="{NS_R}" xmlns:p="{NS_P}" type="{layout_type}" preserve="1">"#
    )?;
    write!(xml, r#"<p:cSld name="{}"><p:spTree>"#, layout.name())?;
    write_group_root(&mut xml);
    match layout {
        Layout::TitleSlide => {
            write_placeholder(
                &mut xml,
                &PlaceholderSpec {
                    id: 2,
                    name: "Title 1",
                    ph: r#"<p:ph type="ctrTitle"/>"#,
                    area: template.center_title_area(),
                    body_pr: r#"<a:bodyPr anchor="b"/>"#,
                    lst_style: r#"<a:lstStyle><a:lvl1pPr algn="ctr"><a:defRPr sz="6000"/></a:lvl1pPr></a:lstStyle>"#,
                    prompt: TITLE_PROMPT,
                },
            )?;
            write_placeholder(
                &mut xml,
                &PlaceholderSpec {
                    id: 3,
                    name: "Subtitle 2",
                    ph: r#"<p:ph type="subTitle" idx="1"/>"#,
                    area: template.subtitle_area(),
                    body_pr: "<a:bodyPr/>",
                    lst_style: r#"<a:lstStyle><a:lvl1pPr marL="0" indent="0" algn="ctr"><a:buNone/><a:defRPr sz="2400"/></a:lvl1pPr></a:lstStyle>"#,
                    prompt: SUBTITLE_PROMPT,
                },
            )?;
        },
        Layout::TitleOnly => {
            write_placeholder(
                &mut xml,
                &PlaceholderSpec {
                    id: 2,
                    name: "Title 1",
                    ph: r#"<p:ph type="title"/>"#,
                    area: template.title_area(),
                    body_pr: "<a:bodyPr/>",
                    lst_style: "<a:lstStyle/>",
                    prompt: TITLE_PROMPT,
                },
            )?;
        },
        Layout::Blank => {},
    }
    xml.push_str("</p:spTree></p:cSld><p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr></p:sldLayout>");
    Ok(xml)
}

/// Generate theme1.xml with the template's theme fonts.
pub fn theme_xml(template: &Template) -> Result<String> {
    let mut xml = String::with_capacity(4096);
    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    write!(
        xml,
        r#"<a:theme xmlns:a="{NS_A}" name="{}"><a:themeElements>"#,
        escape_xml(&template.name)
    )?;

    xml.push_str(r#"<a:clrScheme name="Office">"#);
    xml.push_str(r#"<a:dk1><a:sysClr val="windowText" lastClr="000000"/></a:dk1>"#);
    xml.push_str(r#"<a:lt1><a:sysClr val="window" lastClr="FFFFFF"/></a:lt1>"#);
    for (tag, value) in [
        ("dk2", "44546A"),
        ("lt2", "E7E6E6"),
        ("accent1", "4472C4"),
        ("accent2", "ED7D31"),
        ("accent3", "A5A5A5"),
        ("accent4", "FFC000"),
        ("accent5", "5B9BD5"),
        ("accent6", "70AD47"),
        ("hlink", "0563C1"),
        ("folHlink", "954F72"),
    ] {
        write!(xml, r#"<a:{tag}><a:srgbClr val="{value}"/></a:{tag}>"#)?;
    }
    xml.push_str("</a:clrScheme>");

    xml.push_str(r#"<a:fontScheme name="Office">"#);
    for (tag, face) in [("majorFont", &template.major_font), ("minorFont", &template.minor_font)] {
        write!(
            xml,
            r#"<a:{tag}><a:latin typeface="{}"/><a:ea typeface=""/><a:cs typeface=""/></a:{tag}>"#,
            escape_xml(face)
        )?;
    }
    xml.push_str("</a:fontScheme>");

    xml.push_str(r#"<a:fmtScheme name="Office"><a:fillStyleLst>"#);
    xml.push_str(r#"<a:solidFill><a:schemeClr val="phClr"/></a:solidFill>"#.repeat(3).as_str());
    xml.push_str("</a:fillStyleLst><a:lnStyleLst>");
    for width in [6350, 12700, 19050] {
        write!(
            xml,
            r#"<a:ln w="{width}" cap="flat" cmpd="sng" algn="ctr"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill><a:prstDash val="solid"/><a:miter lim="800000"/></a:ln>"#
        )?;
    }
    xml.push_str("</a:lnStyleLst><a:effectStyleLst>");
    xml.push_str("<a:effectStyle><a:effectLst/></a:effectStyle>".repeat(3).as_str());
    xml.push_str("</a:effectStyleLst><a:bgFillStyleLst>");
    xml.push_str(r#"<a:solidFill><a:schemeClr val="phClr"/></a:solidFill>"#.repeat(3).as_str());
    xml.push_str("</a:bgFillStyleLst></a:fmtScheme>");

    xml.push_str("</a:themeElements><a:objectDefaults/><a:extraClrSchemeLst/></a:theme>");
    Ok(xml)
}

/// presProps.xml
pub fn pres_props_xml() -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><p:presentationPr xmlns:a="{NS_A}" xmlns:r="{NS_R}" xmlns:p="{NS_P}"/>"#
    )
}

/// tableStyles.xml, referencing the built-in "Medium Style 2 - Accent 1".
pub fn table_styles_xml() -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><a:tblStyleLst xmlns:a="{NS_A}" def="{{5C22544A-7EE6-4342-B048-85BDC9FD1C3A}}"/>"#
    )
}

/// docProps/core.xml with the presentation title.
pub fn core_props_xml(title: Option<&str>) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">"#,
    );
    if let Some(title) = title {
        xml.push_str("<dc:title>");
        xml.push_str(&escape_xml(title));
        xml.push_str("</dc:title>");
    }
    xml.push_str("<cp:revision>1</cp:revision></cp:coreProperties>");
    xml
}

/// docProps/app.xml
pub fn app_props_xml(slide_count: usize) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties"><Application>{}</Application><Slides>{}</Slides></Properties>"#,
        concat!("pptx-tools/", env!("CARGO_PKG_VERSION")),
        slide_count
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_sizes() {
        let standard = Template::from_kind(TemplateKind::Standard);
        assert_eq!(standard.slide_size().width, Length::from_inches(10.0));
        let wide = Template::from(TemplateKind::Widescreen);
        assert_eq!(wide.slide_size().height, Length::from_inches(7.5));
        assert!(wide.slide_size().width > standard.slide_size().width);
    }

    #[test]
    fn test_master_lists_layouts() {
        let xml = slide_master_xml(&Template::default(), 3).unwrap();
        assert!(xml.contains(r#"<p:sldLayoutId id="2147483649" r:id="rId1"/>"#));
        assert!(xml.contains(r#"<p:sldLayoutId id="2147483651" r:id="rId3"/>"#));
        assert!(xml.ends_with("</p:sldMaster>"));
    }

    #[test]
    fn test_layouts_carry_their_placeholders() {
        let template = Template::default();
        let title = slide_layout_xml(&template, Layout::TitleSlide).unwrap();
        assert!(title.contains(r#"type="ctrTitle""#) && title.contains(r#"type="subTitle""#));
        let blank = slide_layout_xml(&template, Layout::Blank).unwrap();
        assert!(!blank.contains("<p:sp>"));
    }

    #[test]
    fn test_theme_uses_template_fonts() {
        let template = Template::default().with_theme_fonts("Roboto Slab", "Roboto");
        let xml = theme_xml(&template).unwrap();
        assert!(xml.contains(r#"<a:majorFont><a:latin typeface="Roboto Slab"/>"#));
        assert!(xml.contains(r#"<a:minorFont><a:latin typeface="Roboto"/>"#));
    }

    #[test]
    fn test_core_props_escape_title() {
        assert!(core_props_xml(Some("R&D")).contains("<dc:title>R&amp;D</dc:title>"));
        assert!(!core_props_xml(None).contains("dc:title"));
    }
}
