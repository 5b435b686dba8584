//! Office Open XML presentation writer.
//!
//! Emits a self-contained `.pptx` package: one slide master with a single
//! blank layout, a generated theme carrying the deck palette, one slide part
//! per slide and a notes slide for every content slide that has speaker
//! notes. Notes on the title slide are not written.
//!
//! The first slide is rendered as a title slide (centered title, subtitle
//! built from its leading bullets); every other slide is a title plus a
//! bulleted body.

use std::fmt::Write as FmtWrite;
use std::fs::File;
use std::io::{Seek, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, Utc};
use tracing::{debug, info};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use super::theme::{Palette, Theme};
use crate::constants::deck::{
    BULLET_SIZE, BULLET_SPACE_BEFORE, CONTENT_TITLE_SIZE, SLIDE_HEIGHT_EMU, SLIDE_WIDTH_EMU,
    SUBTITLE_BULLETS, SUBTITLE_SIZE, TITLE_SLIDE_TITLE_SIZE,
};
use crate::types::{DeckError, Result, Slide, short_hash};

const XML_DECL: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;
const NS_A: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
const NS_R: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const NS_P: &str = "http://schemas.openxmlformats.org/presentationml/2006/main";
const NS_PKG_RELS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
const REL: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

const CT_SLIDE: &str = "application/vnd.openxmlformats-officedocument.presentationml.slide+xml";
const CT_NOTES: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.notesSlide+xml";

/// Presentation-level relationships before the first slide
const FIRST_SLIDE_REL: usize = 4;
const FIRST_SLIDE_ID: usize = 256;

/// Shape geometry in EMU: (x, y, cx, cy)
type Frame = (i64, i64, i64, i64);

const TITLE_SLIDE_TITLE: Frame = (685_800, 2_130_425, 7_772_400, 1_470_025);
const TITLE_SLIDE_SUBTITLE: Frame = (1_371_600, 3_886_200, 6_400_800, 1_752_600);
const CONTENT_TITLE: Frame = (457_200, 274_638, 8_229_600, 1_143_000);
const CONTENT_BODY: Frame = (457_200, 1_600_200, 8_229_600, 4_525_963);

/// Escape text for inclusion in XML content or attribute values
pub fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            // Control characters other than tab/newline are not legal XML 1.0
            c if c.is_control() && c != '\t' && c != '\n' => {}
            c => out.push(c),
        }
    }
    out
}

/// `presentation_<YYYYmmdd_HHMMSS>_<hash8>.pptx` for the given slides and time
pub fn output_filename(slides: &[Slide], now: DateTime<Local>) -> String {
    let titles: Vec<&str> = slides.iter().map(|s| s.title.as_str()).collect();
    let seed = format!(
        "{}|{}",
        titles.join("|"),
        now.timestamp_nanos_opt().unwrap_or_default()
    );
    format!(
        "presentation_{}_{}.pptx",
        now.format("%Y%m%d_%H%M%S"),
        short_hash(&seed, 8)
    )
}

/// Writes slide sequences as `.pptx` packages in a fixed theme
#[derive(Debug, Clone, Copy)]
pub struct DeckWriter {
    theme: Theme,
}

impl DeckWriter {
    pub fn new(theme: Theme) -> Self {
        Self { theme }
    }

    /// Write the deck under `dir` with a unique file name and return its path.
    ///
    /// A partially written file is removed when packaging fails.
    pub fn save(&self, slides: &[Slide], dir: &Path) -> Result<PathBuf> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(output_filename(slides, Local::now()));

        let file = File::create(&path)?;
        if let Err(e) = self.write_to(slides, file) {
            let _ = std::fs::remove_file(&path);
            return Err(e);
        }

        info!(
            path = %path.display(),
            slides = slides.len(),
            theme = %self.theme,
            "Presentation written"
        );
        Ok(path)
    }

    /// Write the package for `slides` into any seekable sink
    pub fn write_to<W: Write + Seek>(&self, slides: &[Slide], sink: W) -> Result<W> {
        if slides.is_empty() {
            return Err(DeckError::InvalidInput(
                "cannot write a presentation without slides".to_string(),
            ));
        }

        let palette = self.theme.palette();
        let mut zip = ZipWriter::new(sink);
        let options =
            SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        let part = |zip: &mut ZipWriter<W>, name: &str, body: &str| -> Result<()> {
            zip.start_file(name, options)?;
            zip.write_all(body.as_bytes())?;
            Ok(())
        };

        part(&mut zip, "[Content_Types].xml", &content_types_xml(slides)?)?;
        part(&mut zip, "_rels/.rels", &package_rels_xml())?;
        part(
            &mut zip,
            "docProps/core.xml",
            &core_props_xml(&slides[0].title, Utc::now()),
        )?;
        part(
            &mut zip,
            "ppt/presentation.xml",
            &presentation_xml(slides.len())?,
        )?;
        part(
            &mut zip,
            "ppt/_rels/presentation.xml.rels",
            &presentation_rels_xml(slides.len())?,
        )?;
        part(
            &mut zip,
            "ppt/slideMasters/slideMaster1.xml",
            &slide_master_xml(&palette)?,
        )?;
        part(
            &mut zip,
            "ppt/slideMasters/_rels/slideMaster1.xml.rels",
            &rels_xml(&[
                ("rId1", "slideLayout", "../slideLayouts/slideLayout1.xml"),
                ("rId2", "theme", "../theme/theme1.xml"),
            ])?,
        )?;
        part(
            &mut zip,
            "ppt/slideLayouts/slideLayout1.xml",
            &slide_layout_xml(),
        )?;
        part(
            &mut zip,
            "ppt/slideLayouts/_rels/slideLayout1.xml.rels",
            &rels_xml(&[("rId1", "slideMaster", "../slideMasters/slideMaster1.xml")])?,
        )?;
        part(
            &mut zip,
            "ppt/notesMasters/notesMaster1.xml",
            &notes_master_xml(),
        )?;
        part(
            &mut zip,
            "ppt/notesMasters/_rels/notesMaster1.xml.rels",
            &rels_xml(&[("rId1", "theme", "../theme/theme2.xml")])?,
        )?;
        part(
            &mut zip,
            "ppt/theme/theme1.xml",
            &theme_xml(self.theme.name(), &palette)?,
        )?;
        part(
            &mut zip,
            "ppt/theme/theme2.xml",
            &theme_xml("notes", &Theme::Professional.palette())?,
        )?;

        for (index, slide) in slides.iter().enumerate() {
            let number = index + 1;
            let xml = if index == 0 {
                title_slide_xml(slide, &palette)?
            } else {
                content_slide_xml(slide, &palette)?
            };
            part(&mut zip, &format!("ppt/slides/slide{}.xml", number), &xml)?;

            let notes_target = format!("../notesSlides/notesSlide{}.xml", number);
            let notes = slide_notes(index, slide);
            let mut rels = vec![(
                "rId1",
                "slideLayout",
                "../slideLayouts/slideLayout1.xml",
            )];
            if notes.is_some() {
                rels.push(("rId2", "notesSlide", notes_target.as_str()));
            }
            part(
                &mut zip,
                &format!("ppt/slides/_rels/slide{}.xml.rels", number),
                &rels_xml(&rels)?,
            )?;

            if let Some(notes) = notes {
                let slide_target = format!("../slides/slide{}.xml", number);
                part(
                    &mut zip,
                    &format!("ppt/notesSlides/notesSlide{}.xml", number),
                    &notes_slide_xml(notes)?,
                )?;
                part(
                    &mut zip,
                    &format!("ppt/notesSlides/_rels/notesSlide{}.xml.rels", number),
                    &rels_xml(&[
                        ("rId1", "notesMaster", "../notesMasters/notesMaster1.xml"),
                        ("rId2", "slide", slide_target.as_str()),
                    ])?,
                )?;
            }
        }

        debug!(slides = slides.len(), "Package parts written");
        Ok(zip.finish()?)
    }
}

/// Non-blank speaker notes of a content slide
fn slide_notes(index: usize, slide: &Slide) -> Option<&str> {
    if index == 0 {
        return None;
    }
    slide
        .speaker_notes
        .as_deref()
        .filter(|n| !n.trim().is_empty())
}

// =============================================================================
// Package parts
// =============================================================================

fn content_types_xml(slides: &[Slide]) -> Result<String> {
    let mut xml = String::with_capacity(2048);
    xml.push_str(XML_DECL);
    xml.push_str(r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#);
    xml.push_str(
        r#"<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#,
    );
    xml.push_str(r#"<Default Extension="xml" ContentType="application/xml"/>"#);

    let fixed = [
        (
            "/ppt/presentation.xml",
            "application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml",
        ),
        (
            "/ppt/slideMasters/slideMaster1.xml",
            "application/vnd.openxmlformats-officedocument.presentationml.slideMaster+xml",
        ),
        (
            "/ppt/slideLayouts/slideLayout1.xml",
            "application/vnd.openxmlformats-officedocument.presentationml.slideLayout+xml",
        ),
        (
            "/ppt/notesMasters/notesMaster1.xml",
            "application/vnd.openxmlformats-officedocument.presentationml.notesMaster+xml",
        ),
        ("/ppt/theme/theme1.xml", "application/vnd.openxmlformats-officedocument.theme+xml"),
        ("/ppt/theme/theme2.xml", "application/vnd.openxmlformats-officedocument.theme+xml"),
        ("/docProps/core.xml", "application/vnd.openxmlformats-package.core-properties+xml"),
    ];
    for (name, content_type) in fixed {
        write!(
            xml,
            r#"<Override PartName="{}" ContentType="{}"/>"#,
            name, content_type
        )?;
    }

    for (index, slide) in slides.iter().enumerate() {
        let number = index + 1;
        write!(
            xml,
            r#"<Override PartName="/ppt/slides/slide{}.xml" ContentType="{}"/>"#,
            number, CT_SLIDE
        )?;
        if slide_notes(index, slide).is_some() {
            write!(
                xml,
                r#"<Override PartName="/ppt/notesSlides/notesSlide{}.xml" ContentType="{}"/>"#,
                number, CT_NOTES
            )?;
        }
    }

    xml.push_str("</Types>");
    Ok(xml)
}

fn package_rels_xml() -> String {
    let mut xml = String::with_capacity(512);
    xml.push_str(XML_DECL);
    xml.push_str(
        r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
    );
    xml.push_str(&format!(
        r#"<Relationship Id="rId1" Type="{}/officeDocument" Target="ppt/presentation.xml"/>"#,
        REL
    ));
    xml.push_str(&format!(
        r#"<Relationship Id="rId2" Type="{}/metadata/core-properties" Target="docProps/core.xml"/>"#,
        NS_PKG_RELS
    ));
    xml.push_str("</Relationships>");
    xml
}

/// Part-level relationships as (id, type suffix, target)
fn rels_xml(rels: &[(&str, &str, &str)]) -> Result<String> {
    let mut xml = String::with_capacity(256 + rels.len() * 160);
    xml.push_str(XML_DECL);
    xml.push_str(
        r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
    );
    for (id, kind, target) in rels {
        write!(
            xml,
            r#"<Relationship Id="{}" Type="{}/{}" Target="{}"/>"#,
            id, REL, kind, target
        )?;
    }
    xml.push_str("</Relationships>");
    Ok(xml)
}

fn core_props_xml(title: &str, created: DateTime<Utc>) -> String {
    format!(
        concat!(
            "{}",
            r#"<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" "#,
            r#"xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" "#,
            r#"xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">"#,
            "<dc:title>{}</dc:title><dc:creator>deckweave</dc:creator>",
            r#"<dcterms:created xsi:type="dcterms:W3CDTF">{}</dcterms:created>"#,
            "</cp:coreProperties>"
        ),
        XML_DECL,
        escape_xml(title),
        created.format("%Y-%m-%dT%H:%M:%SZ")
    )
}

fn presentation_xml(slide_count: usize) -> Result<String> {
    let mut xml = String::with_capacity(1024 + slide_count * 48);
    xml.push_str(XML_DECL);
    write!(
        xml,
        r#"<p:presentation xmlns:a="{}" xmlns:r="{}" xmlns:p="{}" saveSubsetFonts="1">"#,
        NS_A, NS_R, NS_P
    )?;
    xml.push_str(
        r#"<p:sldMasterIdLst><p:sldMasterId id="2147483648" r:id="rId1"/></p:sldMasterIdLst>"#,
    );
    xml.push_str(r#"<p:notesMasterIdLst><p:notesMasterId r:id="rId3"/></p:notesMasterIdLst>"#);

    xml.push_str("<p:sldIdLst>");
    for index in 0..slide_count {
        write!(
            xml,
            r#"<p:sldId id="{}" r:id="rId{}"/>"#,
            FIRST_SLIDE_ID + index,
            FIRST_SLIDE_REL + index
        )?;
    }
    xml.push_str("</p:sldIdLst>");

    write!(
        xml,
        r#"<p:sldSz cx="{}" cy="{}" type="screen4x3"/>"#,
        SLIDE_WIDTH_EMU, SLIDE_HEIGHT_EMU
    )?;
    xml.push_str(r#"<p:notesSz cx="6858000" cy="9144000"/>"#);
    xml.push_str("</p:presentation>");
    Ok(xml)
}

fn presentation_rels_xml(slide_count: usize) -> Result<String> {
    let targets: Vec<(String, String)> = (0..slide_count)
        .map(|i| {
            (
                format!("rId{}", FIRST_SLIDE_REL + i),
                format!("slides/slide{}.xml", i + 1),
            )
        })
        .collect();

    let mut rels = vec![
        ("rId1", "slideMaster", "slideMasters/slideMaster1.xml"),
        ("rId2", "theme", "theme/theme1.xml"),
        ("rId3", "notesMaster", "notesMasters/notesMaster1.xml"),
    ];
    rels.extend(
        targets
            .iter()
            .map(|(id, target)| (id.as_str(), "slide", target.as_str())),
    );
    rels_xml(&rels)
}

// =============================================================================
// Masters, layout, theme
// =============================================================================

fn open_root(xml: &mut String, element: &str, extra: &str) -> Result<()> {
    write!(
        xml,
        r#"<{} xmlns:a="{}" xmlns:r="{}" xmlns:p="{}"{}>"#,
        element, NS_A, NS_R, NS_P, extra
    )?;
    Ok(())
}

/// Shape tree header every `p:spTree` starts with
fn group_header(xml: &mut String) {
    xml.push_str(r#"<p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr>"#);
    xml.push_str(
        r#"<p:grpSpPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="0" cy="0"/><a:chOff x="0" y="0"/><a:chExt cx="0" cy="0"/></a:xfrm></p:grpSpPr>"#,
    );
}

fn solid_background(xml: &mut String, color: &str) -> Result<()> {
    write!(
        xml,
        r#"<p:bg><p:bgPr><a:solidFill><a:srgbClr val="{}"/></a:solidFill><a:effectLst/></p:bgPr></p:bg>"#,
        color
    )?;
    Ok(())
}

const CLR_MAP: &str = r#"<p:clrMap bg1="lt1" tx1="dk1" bg2="lt2" tx2="dk2" accent1="accent1" accent2="accent2" accent3="accent3" accent4="accent4" accent5="accent5" accent6="accent6" hlink="hlink" folHlink="folHlink"/>"#;

fn slide_master_xml(palette: &Palette) -> Result<String> {
    let mut xml = String::with_capacity(1536);
    xml.push_str(XML_DECL);
    open_root(&mut xml, "p:sldMaster", "")?;
    xml.push_str("<p:cSld>");
    solid_background(&mut xml, palette.background)?;
    xml.push_str("<p:spTree>");
    group_header(&mut xml);
    xml.push_str("</p:spTree></p:cSld>");
    xml.push_str(CLR_MAP);
    xml.push_str(
        r#"<p:sldLayoutIdLst><p:sldLayoutId id="2147483649" r:id="rId1"/></p:sldLayoutIdLst>"#,
    );
    xml.push_str("</p:sldMaster>");
    Ok(xml)
}

fn slide_layout_xml() -> String {
    let mut xml = String::with_capacity(1024);
    xml.push_str(XML_DECL);
    xml.push_str(&format!(
        r#"<p:sldLayout xmlns:a="{}" xmlns:r="{}" xmlns:p="{}" type="blank" preserve="1">"#,
        NS_A, NS_R, NS_P
    ));
    xml.push_str(r#"<p:cSld name="Blank"><p:spTree>"#);
    group_header(&mut xml);
    xml.push_str("</p:spTree></p:cSld>");
    xml.push_str("<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr></p:sldLayout>");
    xml
}

fn notes_master_xml() -> String {
    let mut xml = String::with_capacity(1024);
    xml.push_str(XML_DECL);
    xml.push_str(&format!(
        r#"<p:notesMaster xmlns:a="{}" xmlns:r="{}" xmlns:p="{}">"#,
        NS_A, NS_R, NS_P
    ));
    xml.push_str(
        r#"<p:cSld><p:bg><p:bgRef idx="1001"><a:schemeClr val="bg1"/></p:bgRef></p:bg><p:spTree>"#,
    );
    group_header(&mut xml);
    xml.push_str("</p:spTree></p:cSld>");
    xml.push_str(CLR_MAP);
    xml.push_str("</p:notesMaster>");
    xml
}

fn theme_xml(name: &str, palette: &Palette) -> Result<String> {
    let mut xml = String::with_capacity(3072);
    xml.push_str(XML_DECL);
    write!(xml, r#"<a:theme xmlns:a="{}" name="{}">"#, NS_A, escape_xml(name))?;
    write!(
        xml,
        r#"<a:themeElements><a:clrScheme name="{}">"#,
        escape_xml(name)
    )?;

    let scheme = [
        ("dk1", "000000"),
        ("lt1", "FFFFFF"),
        ("dk2", palette.title),
        ("lt2", palette.background),
        ("accent1", palette.accent),
        ("accent2", palette.title),
        ("accent3", palette.text),
        ("accent4", "A5A5A5"),
        ("accent5", "5B9BD5"),
        ("accent6", "70AD47"),
        ("hlink", palette.accent),
        ("folHlink", "954F72"),
    ];
    for (slot, color) in scheme {
        write!(xml, r#"<a:{slot}><a:srgbClr val="{color}"/></a:{slot}>"#)?;
    }
    xml.push_str("</a:clrScheme>");

    xml.push_str(r#"<a:fontScheme name="deckweave">"#);
    for font in ["majorFont", "minorFont"] {
        write!(
            xml,
            r#"<a:{font}><a:latin typeface="Calibri"/><a:ea typeface=""/><a:cs typeface=""/></a:{font}>"#
        )?;
    }
    xml.push_str("</a:fontScheme>");

    let fill = r#"<a:solidFill><a:schemeClr val="phClr"/></a:solidFill>"#;
    xml.push_str(r#"<a:fmtScheme name="deckweave"><a:fillStyleLst>"#);
    xml.push_str(&fill.repeat(3));
    xml.push_str("</a:fillStyleLst><a:lnStyleLst>");
    for width in [9525, 25400, 38100] {
        write!(xml, r#"<a:ln w="{}">{}</a:ln>"#, width, fill)?;
    }
    xml.push_str("</a:lnStyleLst><a:effectStyleLst>");
    xml.push_str(&"<a:effectStyle><a:effectLst/></a:effectStyle>".repeat(3));
    xml.push_str("</a:effectStyleLst><a:bgFillStyleLst>");
    xml.push_str(&fill.repeat(3));
    xml.push_str("</a:bgFillStyleLst></a:fmtScheme>");

    xml.push_str("</a:themeElements><a:objectDefaults/><a:extraClrSchemeLst/></a:theme>");
    Ok(xml)
}

// =============================================================================
// Slides
// =============================================================================

/// Text run styling in hundredths of a point
struct RunStyle<'a> {
    size: u32,
    bold: bool,
    color: &'a str,
}

fn write_run(xml: &mut String, text: &str, style: &RunStyle<'_>) -> Result<()> {
    write!(
        xml,
        r#"<a:r><a:rPr lang="en-US" sz="{}"{} dirty="0"><a:solidFill><a:srgbClr val="{}"/></a:solidFill></a:rPr><a:t>{}</a:t></a:r>"#,
        style.size,
        if style.bold { r#" b="1""# } else { "" },
        style.color,
        escape_xml(text)
    )?;
    Ok(())
}

/// Open a placeholder shape up to the start of its paragraphs
fn open_shape(
    xml: &mut String,
    id: u32,
    name: &str,
    placeholder: &str,
    frame: Frame,
    anchor: &str,
) -> Result<()> {
    let (x, y, cx, cy) = frame;
    write!(
        xml,
        r#"<p:sp><p:nvSpPr><p:cNvPr id="{}" name="{}"/><p:cNvSpPr><a:spLocks noGrp="1"/></p:cNvSpPr><p:nvPr>{}</p:nvPr></p:nvSpPr>"#,
        id, name, placeholder
    )?;
    write!(
        xml,
        r#"<p:spPr><a:xfrm><a:off x="{}" y="{}"/><a:ext cx="{}" cy="{}"/></a:xfrm><a:prstGeom prst="rect"><a:avLst/></a:prstGeom></p:spPr>"#,
        x, y, cx, cy
    )?;
    write!(
        xml,
        r#"<p:txBody><a:bodyPr wrap="square" anchor="{}"><a:normAutofit/></a:bodyPr><a:lstStyle/>"#,
        anchor
    )?;
    Ok(())
}

fn close_shape(xml: &mut String) {
    xml.push_str("</p:txBody></p:sp>");
}

fn open_slide(xml: &mut String, palette: &Palette) -> Result<()> {
    xml.push_str(XML_DECL);
    open_root(xml, "p:sld", "")?;
    xml.push_str("<p:cSld>");
    solid_background(xml, palette.background)?;
    xml.push_str("<p:spTree>");
    group_header(xml);
    Ok(())
}

fn close_slide(xml: &mut String) {
    xml.push_str("</p:spTree></p:cSld><p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr></p:sld>");
}

fn title_slide_xml(slide: &Slide, palette: &Palette) -> Result<String> {
    let mut xml = String::with_capacity(4096);
    open_slide(&mut xml, palette)?;

    open_shape(
        &mut xml,
        2,
        "Title 1",
        r#"<p:ph type="ctrTitle"/>"#,
        TITLE_SLIDE_TITLE,
        "ctr",
    )?;
    xml.push_str(r#"<a:p><a:pPr algn="ctr"/>"#);
    write_run(
        &mut xml,
        &slide.title,
        &RunStyle {
            size: TITLE_SLIDE_TITLE_SIZE,
            bold: true,
            color: palette.title,
        },
    )?;
    xml.push_str("</a:p>");
    close_shape(&mut xml);

    if slide.has_bullets() {
        let subtitle = slide
            .bullets
            .iter()
            .take(SUBTITLE_BULLETS)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" | ");
        open_shape(
            &mut xml,
            3,
            "Subtitle 2",
            r#"<p:ph type="subTitle" idx="1"/>"#,
            TITLE_SLIDE_SUBTITLE,
            "t",
        )?;
        xml.push_str(r#"<a:p><a:pPr algn="ctr"/>"#);
        write_run(
            &mut xml,
            &subtitle,
            &RunStyle {
                size: SUBTITLE_SIZE,
                bold: false,
                color: palette.text,
            },
        )?;
        xml.push_str("</a:p>");
        close_shape(&mut xml);
    }

    close_slide(&mut xml);
    Ok(xml)
}

fn content_slide_xml(slide: &Slide, palette: &Palette) -> Result<String> {
    let mut xml = String::with_capacity(4096 + slide.bullets.len() * 384);
    open_slide(&mut xml, palette)?;

    open_shape(
        &mut xml,
        2,
        "Title 1",
        r#"<p:ph type="title"/>"#,
        CONTENT_TITLE,
        "b",
    )?;
    xml.push_str("<a:p>");
    write_run(
        &mut xml,
        &slide.title,
        &RunStyle {
            size: CONTENT_TITLE_SIZE,
            bold: true,
            color: palette.title,
        },
    )?;
    xml.push_str("</a:p>");
    close_shape(&mut xml);

    if slide.has_bullets() {
        open_shape(
            &mut xml,
            3,
            "Content Placeholder 2",
            r#"<p:ph idx="1"/>"#,
            CONTENT_BODY,
            "t",
        )?;
        let style = RunStyle {
            size: BULLET_SIZE,
            bold: false,
            color: palette.text,
        };
        for bullet in &slide.bullets {
            write!(
                xml,
                r#"<a:p><a:pPr marL="342900" indent="-342900"><a:spcBef><a:spcPts val="{}"/></a:spcBef><a:buFont typeface="Arial"/><a:buChar char="&#8226;"/></a:pPr>"#,
                BULLET_SPACE_BEFORE
            )?;
            write_run(&mut xml, bullet, &style)?;
            xml.push_str("</a:p>");
        }
        close_shape(&mut xml);
    }

    close_slide(&mut xml);
    Ok(xml)
}

fn notes_slide_xml(notes: &str) -> Result<String> {
    let mut xml = String::with_capacity(2048 + notes.len());
    xml.push_str(XML_DECL);
    open_root(&mut xml, "p:notes", "")?;
    xml.push_str("<p:cSld><p:spTree>");
    group_header(&mut xml);

    xml.push_str(
        r#"<p:sp><p:nvSpPr><p:cNvPr id="2" name="Slide Image Placeholder 1"/><p:cNvSpPr><a:spLocks noGrp="1" noRot="1" noChangeAspect="1"/></p:cNvSpPr><p:nvPr><p:ph type="sldImg"/></p:nvPr></p:nvSpPr><p:spPr/></p:sp>"#,
    );
    xml.push_str(
        r#"<p:sp><p:nvSpPr><p:cNvPr id="3" name="Notes Placeholder 2"/><p:cNvSpPr><a:spLocks noGrp="1"/></p:cNvSpPr><p:nvPr><p:ph type="body" idx="1"/></p:nvPr></p:nvSpPr><p:spPr/>"#,
    );
    xml.push_str("<p:txBody><a:bodyPr/><a:lstStyle/>");
    for line in notes.lines().map(str::trim).filter(|l| !l.is_empty()) {
        write!(
            xml,
            r#"<a:p><a:r><a:rPr lang="en-US" dirty="0"/><a:t>{}</a:t></a:r></a:p>"#,
            escape_xml(line)
        )?;
    }
    xml.push_str("</p:txBody></p:sp>");

    xml.push_str("</p:spTree></p:cSld><p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr></p:notes>");
    Ok(xml)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::io::{Cursor, Read};
    use tempfile::TempDir;
    use zip::ZipArchive;

    fn deck() -> Vec<Slide> {
        let mut intro = Slide::with_bullets(
            "Rust & Safety",
            ["Ownership", "Borrowing", "Lifetimes", "Traits"],
        );
        intro.speaker_notes = Some("Introduce yourself.".to_string());
        let mut ownership =
            Slide::with_bullets("Ownership", ["Each value has one owner", "Moves transfer it"]);
        ownership.speaker_notes = Some("Welcome everyone.\nToday: <memory> safety.".to_string());
        vec![intro, ownership, Slide::new("Questions")]
    }

    fn read_part(bytes: &[u8], name: &str) -> String {
        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut file = archive.by_name(name).unwrap();
        let mut content = String::new();
        file.read_to_string(&mut content).unwrap();
        content
    }

    fn write_deck(theme: Theme, slides: &[Slide]) -> Vec<u8> {
        DeckWriter::new(theme)
            .write_to(slides, Cursor::new(Vec::new()))
            .unwrap()
            .into_inner()
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(
            escape_xml("a < b && c > \"d\" 'e'"),
            "a &lt; b &amp;&amp; c &gt; &quot;d&quot; &apos;e&apos;"
        );
        assert_eq!(escape_xml("tab\tnew\nbell\u{7}"), "tab\tnew\nbell");
        assert_eq!(escape_xml("plain"), "plain");
    }

    #[test]
    fn test_package_contains_expected_parts() {
        let bytes = write_deck(Theme::Professional, &deck());
        let archive = ZipArchive::new(Cursor::new(bytes.as_slice())).unwrap();
        let names: Vec<&str> = archive.file_names().collect();

        for expected in [
            "[Content_Types].xml",
            "_rels/.rels",
            "ppt/presentation.xml",
            "ppt/_rels/presentation.xml.rels",
            "ppt/slideMasters/slideMaster1.xml",
            "ppt/slideLayouts/slideLayout1.xml",
            "ppt/theme/theme1.xml",
            "ppt/notesMasters/notesMaster1.xml",
            "ppt/slides/slide1.xml",
            "ppt/slides/slide2.xml",
            "ppt/slides/slide3.xml",
            "ppt/notesSlides/notesSlide2.xml",
        ] {
            assert!(names.contains(&expected), "missing part {}", expected);
        }
        // Only the second slide gets a notes part
        assert!(!names.contains(&"ppt/notesSlides/notesSlide1.xml"));
        assert!(!names.contains(&"ppt/notesSlides/notesSlide3.xml"));
    }

    #[test]
    fn test_title_slide_layout() {
        let bytes = write_deck(Theme::Professional, &deck());
        let slide = read_part(&bytes, "ppt/slides/slide1.xml");

        assert!(slide.contains(r#"<p:ph type="ctrTitle"/>"#));
        assert!(slide.contains(r#"sz="5400" b="1""#));
        assert!(slide.contains("<a:t>Rust &amp; Safety</a:t>"));
        // Subtitle joins only the first three bullets
        assert!(slide.contains("<a:t>Ownership | Borrowing | Lifetimes</a:t>"));
        assert!(!slide.contains("Traits"));
        assert!(slide.contains(r#"sz="2000""#));
    }

    #[test]
    fn test_content_slide_bullets() {
        let bytes = write_deck(Theme::Professional, &deck());
        let slide = read_part(&bytes, "ppt/slides/slide2.xml");

        assert!(slide.contains(r#"sz="3600" b="1""#));
        assert!(slide.contains("<a:t>Each value has one owner</a:t>"));
        assert!(slide.contains("<a:t>Moves transfer it</a:t>"));
        assert_eq!(slide.matches(r#"<a:spcPts val="1200"/>"#).count(), 2);

        // No body shape for a slide without bullets
        let bare = read_part(&bytes, "ppt/slides/slide3.xml");
        assert!(bare.contains("<a:t>Questions</a:t>"));
        assert!(!bare.contains("Content Placeholder"));
    }

    #[test]
    fn test_theme_colors_applied() {
        let bytes = write_deck(Theme::Modern, &deck());
        let slide = read_part(&bytes, "ppt/slides/slide2.xml");

        assert!(slide.contains(r#"<a:srgbClr val="ECF0F1"/>"#));
        assert!(slide.contains(r#"<a:srgbClr val="2980B9"/>"#));
        assert!(slide.contains(r#"<a:srgbClr val="2C3E50"/>"#));

        let theme = read_part(&bytes, "ppt/theme/theme1.xml");
        assert!(theme.contains(r#"name="modern""#));
        assert!(theme.contains(r#"<a:accent1><a:srgbClr val="E67E22"/></a:accent1>"#));
    }

    #[test]
    fn test_notes_slide_and_relationships() {
        let bytes = write_deck(Theme::Minimal, &deck());

        let notes = read_part(&bytes, "ppt/notesSlides/notesSlide2.xml");
        assert!(notes.contains(r#"<p:ph type="body" idx="1"/>"#));
        assert!(notes.contains("<a:t>Welcome everyone.</a:t>"));
        assert!(notes.contains("<a:t>Today: &lt;memory&gt; safety.</a:t>"));

        let rels = read_part(&bytes, "ppt/slides/_rels/slide2.xml.rels");
        assert!(rels.contains("../notesSlides/notesSlide2.xml"));
        let rels = read_part(&bytes, "ppt/slides/_rels/slide3.xml.rels");
        assert!(!rels.contains("notesSlide"));

        let types = read_part(&bytes, "[Content_Types].xml");
        assert!(types.contains("/ppt/notesSlides/notesSlide2.xml"));
        assert!(!types.contains("/ppt/notesSlides/notesSlide3.xml"));
    }

    #[test]
    fn test_title_slide_notes_not_written() {
        let bytes = write_deck(Theme::Professional, &deck());

        let rels = read_part(&bytes, "ppt/slides/_rels/slide1.xml.rels");
        assert!(!rels.contains("notesSlide"));
        let types = read_part(&bytes, "[Content_Types].xml");
        assert!(!types.contains("/ppt/notesSlides/notesSlide1.xml"));

        let archive = ZipArchive::new(Cursor::new(bytes.as_slice())).unwrap();
        let notes_parts: Vec<&str> = archive
            .file_names()
            .filter(|n| n.starts_with("ppt/notesSlides/notesSlide"))
            .collect();
        assert_eq!(notes_parts, vec!["ppt/notesSlides/notesSlide2.xml"]);
    }

    #[test]
    fn test_presentation_lists_slides_in_order() {
        let bytes = write_deck(Theme::Professional, &deck());
        let presentation = read_part(&bytes, "ppt/presentation.xml");

        let first = presentation.find(r#"<p:sldId id="256" r:id="rId4"/>"#).unwrap();
        let last = presentation.find(r#"<p:sldId id="258" r:id="rId6"/>"#).unwrap();
        assert!(first < last);
        assert!(presentation.contains(r#"<p:sldSz cx="9144000" cy="6858000""#));

        let rels = read_part(&bytes, "ppt/_rels/presentation.xml.rels");
        assert!(rels.contains(r#"Id="rId6""#));
        assert!(rels.contains("slides/slide3.xml"));
    }

    #[test]
    fn test_blank_notes_are_skipped() {
        let mut slides = deck();
        slides[1].speaker_notes = Some("   ".to_string());
        let bytes = write_deck(Theme::Professional, &slides);
        let archive = ZipArchive::new(Cursor::new(bytes.as_slice())).unwrap();
        assert!(archive.file_names().all(|n| !n.starts_with("ppt/notesSlides/")));
    }

    #[test]
    fn test_empty_deck_rejected() {
        let result =
            DeckWriter::new(Theme::Professional).write_to(&[], Cursor::new(Vec::new()));
        assert!(matches!(result, Err(DeckError::InvalidInput(_))));
    }

    #[test]
    fn test_output_filename_format() {
        let now = Local.with_ymd_and_hms(2026, 3, 14, 9, 26, 53).unwrap();
        let name = output_filename(&deck(), now);

        assert!(name.starts_with("presentation_20260314_092653_"));
        assert!(name.ends_with(".pptx"));
        let hash = &name["presentation_20260314_092653_".len()..name.len() - ".pptx".len()];
        assert_eq!(hash.len(), 8);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));

        // Same instant, different titles
        let other = output_filename(&[Slide::new("Other")], now);
        assert_ne!(name, other);
    }

    #[test]
    fn test_save_writes_file() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("decks");
        let path = DeckWriter::new(Theme::Professional)
            .save(&deck(), &out)
            .unwrap();

        assert!(path.exists());
        assert_eq!(path.parent(), Some(out.as_path()));
        let bytes = std::fs::read(&path).unwrap();
        assert!(read_part(&bytes, "ppt/slides/slide1.xml").contains("Rust &amp; Safety"));
    }
}
