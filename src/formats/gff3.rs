//! Ensembl genome GFF3 row shapes, classification and validation.
//!
//! A GFF3 data line has 9 tab-delimited columns:
//! 1. **seqid**: Chromosome/contig name (bare, never `chr`-prefixed in
//!    Ensembl files)
//! 2. **source**: Annotation source
//! 3. **type**: Feature type (gene, mRNA, exon, CDS, ...)
//! 4. **start**: Start position (1-based, inclusive)
//! 5. **end**: End position (1-based, inclusive)
//! 6. **score**: Confidence score (or `.`)
//! 7. **strand**: `+`, `-`, `.` or `?`
//! 8. **phase**: CDS phase (0, 1, 2, or `.`)
//! 9. **attributes**: Semicolon-separated `key=value[,value...]` pairs
//!
//! Rows are polymorphic over the attribute column: a gene row and a
//! gencode-basic transcript row carry strict attribute schemas, everything
//! else falls back to the generic key-to-values mapping. Which schema
//! applies is decided by [`classify`] on the **raw** attribute text, before
//! structured parsing, so a malformed record is still routed to the stricter
//! schema for an accurate diagnostic.
//!
//! # Examples
//!
//! ```
//! use ensvalid::formats::gff3::{classify, GffRecord, RowKind};
//!
//! let line = "13\tensembl_havana\tgene\t32315086\t32400268\t.\t+\t.\t\
//!             ID=gene:ENSG00000139618;biotype=protein_coding;\
//!             gene_id=ENSG00000139618;logic_name=ensembl_havana_gene_homo_sapiens;version=15";
//! let columns: Vec<&str> = line.split('\t').collect();
//!
//! assert_eq!(classify(columns[8]), RowKind::GeneLike);
//! let record = GffRecord::from_columns(&columns)?;
//! assert!(matches!(record, GffRecord::Gene(_)));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::str::FromStr;

use strum::{Display, EnumString};

use crate::formats::primitives::{
    parse_optional, validate_seqid, AttributeMap, FormatError, GenomicRange, Strand,
    ValidationFailure,
};

/// Number of columns in a GFF3 data line.
pub const GFF3_COLUMNS: usize = 9;

/// The row schema selected for a record by content-based classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    /// Gene-like row: attribute text contains `ID=gene:`.
    GeneLike,
    /// Gencode-basic tagged transcript row: attribute text contains
    /// `tag=gencode_basic`.
    TranscriptTagged,
    /// Any other row; attributes stay a generic mapping.
    Generic,
}

/// Decides which typed row schema applies to a record.
///
/// Substring matching on the raw, unparsed attribute text, evaluated in
/// priority order: the gene check wins over the transcript-tag check.
///
/// # Examples
///
/// ```
/// use ensvalid::formats::gff3::{classify, RowKind};
///
/// assert_eq!(classify("ID=gene:ENSG00000000003;biotype=lncRNA"), RowKind::GeneLike);
/// assert_eq!(classify("ID=transcript:ENST1;tag=gencode_basic"), RowKind::TranscriptTagged);
/// assert_eq!(classify("ID=CDS:ENSP00000362111"), RowKind::Generic);
/// ```
pub fn classify(raw_attribute_text: &str) -> RowKind {
    if raw_attribute_text.contains("ID=gene:") {
        RowKind::GeneLike
    } else if raw_attribute_text.contains("tag=gencode_basic") {
        RowKind::TranscriptTagged
    } else {
        RowKind::Generic
    }
}

/// Ensembl biotype vocabulary for genes and transcripts.
#[allow(non_camel_case_types, missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, Display)]
pub enum Biotype {
    IG_C_gene,
    IG_C_pseudogene,
    IG_D_gene,
    IG_J_gene,
    IG_J_pseudogene,
    IG_V_gene,
    IG_V_pseudogene,
    IG_pseudogene,
    Mt_rRNA,
    Mt_tRNA,
    TEC,
    TR_C_gene,
    TR_D_gene,
    TR_J_gene,
    TR_J_pseudogene,
    TR_V_gene,
    TR_V_pseudogene,
    artifact,
    lncRNA,
    miRNA,
    misc_RNA,
    nonsense_mediated_decay,
    processed_pseudogene,
    processed_transcript,
    protein_coding,
    protein_coding_LoF,
    pseudogene,
    rRNA,
    rRNA_pseudogene,
    retained_intron,
    ribozyme,
    sRNA,
    scRNA,
    scaRNA,
    snRNA,
    snoRNA,
    transcribed_processed_pseudogene,
    transcribed_unitary_pseudogene,
    transcribed_unprocessed_pseudogene,
    translated_processed_pseudogene,
    unitary_pseudogene,
    unprocessed_pseudogene,
    vault_RNA,
}

/// Transcript tag vocabulary for gencode-basic transcript rows.
#[allow(non_camel_case_types, missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, EnumString, Display)]
pub enum TranscriptTag {
    gencode_basic,
    Ensembl_canonical,
    gencode_primary,
    MANE_Select,
    MANE_Plus_Clinical,
}

/// A GFF3 row, generic over its attribute schema.
#[derive(Debug, Clone, PartialEq)]
pub struct Row<A> {
    /// Chromosome/contig name (column 1).
    pub seqid: String,
    /// Annotation source (column 2).
    pub source: String,
    /// Feature type (column 3).
    pub feature_type: String,
    /// Coordinate range (columns 4-5).
    pub location: GenomicRange,
    /// Confidence score; `None` when the column holds `.` (column 6).
    pub score: Option<f64>,
    /// Strand (column 7).
    pub strand: Strand,
    /// CDS phase 0-2; `None` when the column holds `.` (column 8).
    pub phase: Option<u8>,
    /// Parsed attribute schema (column 9).
    pub attributes: A,
}

/// A row whose attributes stay a generic key-to-values mapping.
pub type GenericRow = Row<AttributeMap>;
/// A gene row with the strict gene attribute schema.
pub type GeneRow = Row<GeneAttributes>;
/// A gencode-basic transcript row with the strict transcript attribute schema.
pub type TranscriptRow = Row<TranscriptAttributes>;

/// Strict attribute schema for gene-like rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneAttributes {
    /// `ID` attribute, `gene:`-prefixed.
    pub id: String,
    /// Gene biotype.
    pub biotype: Biotype,
    /// Optional free-text description.
    pub description: Option<String>,
    /// Stable gene identifier.
    pub gene_id: String,
    /// Annotation pipeline logic name.
    pub logic_name: String,
    /// Annotation version.
    pub version: String,
}

/// Strict attribute schema for gencode-basic transcript rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptAttributes {
    /// `ID` attribute, `transcript:`-prefixed.
    pub id: String,
    /// `Parent` attribute, `gene:`-prefixed.
    pub parent: String,
    /// Optional display name.
    pub name: Option<String>,
    /// Transcript biotype.
    pub biotype: Biotype,
    /// Transcript tags; non-empty, each from the known vocabulary.
    pub tags: Vec<TranscriptTag>,
    /// Stable transcript identifier.
    pub transcript_id: String,
    /// Optional transcript support level.
    pub transcript_support_level: Option<String>,
    /// Annotation version.
    pub version: u32,
}

/// A validated GFF3 record, one variant per row schema.
#[derive(Debug, Clone, PartialEq)]
pub enum GffRecord {
    /// Gene-like row.
    Gene(GeneRow),
    /// Gencode-basic transcript row.
    Transcript(TranscriptRow),
    /// Fallback row shape.
    Generic(GenericRow),
}

impl GffRecord {
    /// Builds a typed record from the 9 raw columns of a data line.
    ///
    /// The record is first classified by [`classify`] on the raw attribute
    /// text, then every field is checked independently; a rejected record
    /// carries all of its violated constraints in one [`ValidationFailure`].
    pub fn from_columns(columns: &[&str]) -> Result<GffRecord, ValidationFailure> {
        let mut failure = ValidationFailure::new();
        if columns.len() != GFF3_COLUMNS {
            failure.push(
                FormatError::FieldCount {
                    expected: GFF3_COLUMNS,
                    actual: columns.len(),
                }
                .to_string(),
            );
            return Err(failure);
        }

        let seqid = match validate_seqid(columns[0]) {
            Ok(value) => Some(value.to_string()),
            Err(e) => {
                failure.push(e.to_string());
                None
            }
        };
        let source = columns[1].to_string();
        let feature_type = columns[2].to_string();

        let location = match GenomicRange::parse(columns[3], columns[4]) {
            Ok(range) => Some(range),
            Err(e) => {
                failure.push(e.to_string());
                None
            }
        };

        let score = match parse_optional::<f64>(columns[5], "score") {
            Ok(score) => score,
            Err(e) => {
                failure.push(e.to_string());
                None
            }
        };

        let strand = match Strand::from_str(columns[6]) {
            Ok(strand) => Some(strand),
            Err(e) => {
                failure.push(e.to_string());
                None
            }
        };

        let phase = parse_phase(columns[7], &mut failure);

        let kind = classify(columns[8]);
        let attributes = match AttributeMap::parse(columns[8]) {
            Ok(map) => Some(map),
            Err(e) => {
                failure.push(e.to_string());
                None
            }
        };

        // The base fields are shared; only the attribute schema differs per kind.
        match (kind, attributes) {
            (RowKind::GeneLike, Some(map)) => {
                let attributes = GeneAttributes::from_map(&map, &mut failure);
                failure.finish(|| {
                    GffRecord::Gene(Row {
                        seqid: seqid.unwrap(),
                        source,
                        feature_type,
                        location: location.unwrap(),
                        score,
                        strand: strand.unwrap(),
                        phase,
                        attributes: attributes.unwrap(),
                    })
                })
            }
            (RowKind::TranscriptTagged, Some(map)) => {
                let attributes = TranscriptAttributes::from_map(&map, &mut failure);
                failure.finish(|| {
                    GffRecord::Transcript(Row {
                        seqid: seqid.unwrap(),
                        source,
                        feature_type,
                        location: location.unwrap(),
                        score,
                        strand: strand.unwrap(),
                        phase,
                        attributes: attributes.unwrap(),
                    })
                })
            }
            (RowKind::Generic, Some(map)) => failure.finish(|| {
                GffRecord::Generic(Row {
                    seqid: seqid.unwrap(),
                    source,
                    feature_type,
                    location: location.unwrap(),
                    score,
                    strand: strand.unwrap(),
                    phase,
                    attributes: map,
                })
            }),
            // Attribute parsing already failed; the schema cannot be applied.
            (_, None) => Err(failure),
        }
    }

    /// The seqid of the record, whichever variant it is.
    pub fn seqid(&self) -> &str {
        match self {
            GffRecord::Gene(row) => &row.seqid,
            GffRecord::Transcript(row) => &row.seqid,
            GffRecord::Generic(row) => &row.seqid,
        }
    }
}

fn parse_phase(value: &str, failure: &mut ValidationFailure) -> Option<u8> {
    if value == "." {
        return None;
    }
    match value {
        "0" => Some(0),
        "1" => Some(1),
        "2" => Some(2),
        _ => {
            failure.push(format!("Invalid phase '{value}': expected 0, 1, 2 or '.'."));
            None
        }
    }
}

/// Requires `key` to be present with exactly one value.
///
/// A multi-valued key violates the single-value constraint that gene and
/// transcript schemas place on every non-`tag` attribute.
fn required_single(
    map: &AttributeMap,
    key: &str,
    failure: &mut ValidationFailure,
) -> Option<String> {
    match map.get(key) {
        None => {
            failure.push(format!("Missing required attribute '{key}'."));
            None
        }
        Some(values) if values.len() != 1 => {
            failure.push(format!(
                "Expected single value for {key} in attributes column, got {values:?}."
            ));
            None
        }
        Some(values) => Some(values[0].clone()),
    }
}

/// Holds every key the schema does not extract to the single-value
/// constraint as well. Only `tag` may carry multiple values, and only on
/// transcript rows; `checked` keys were already reported by the schema's
/// own lookups.
fn require_single_values(
    map: &AttributeMap,
    checked: &[&str],
    failure: &mut ValidationFailure,
) {
    for (key, values) in map.iter() {
        if key == "tag" || checked.contains(&key.as_str()) {
            continue;
        }
        if values.len() != 1 {
            failure.push(format!(
                "Expected single value for {key} in attributes column, got {values:?}."
            ));
        }
    }
}

fn optional_single(
    map: &AttributeMap,
    key: &str,
    failure: &mut ValidationFailure,
) -> Option<String> {
    match map.get(key) {
        None => None,
        Some(values) if values.len() != 1 => {
            failure.push(format!(
                "Expected single value for {key} in attributes column, got {values:?}."
            ));
            None
        }
        Some(values) => Some(values[0].clone()),
    }
}

fn parse_biotype(value: &str, failure: &mut ValidationFailure) -> Option<Biotype> {
    match Biotype::from_str(value) {
        Ok(biotype) => Some(biotype),
        Err(_) => {
            failure.push(format!("Unknown Ensembl biotype '{value}'."));
            None
        }
    }
}

fn require_prefix(value: &str, prefix: &str, key: &str, failure: &mut ValidationFailure) {
    if !value.starts_with(prefix) {
        failure.push(format!(
            "Attribute '{key}' value ('{value}') is expected to start with '{prefix}'."
        ));
    }
}

impl GeneAttributes {
    /// Applies the gene schema to a parsed attribute map.
    ///
    /// Every violated constraint is recorded on `failure`; the schema value
    /// is only returned when all required fields were valid. Unknown extra
    /// keys are tolerated but must carry exactly one value.
    pub fn from_map(map: &AttributeMap, failure: &mut ValidationFailure) -> Option<Self> {
        let id = required_single(map, "ID", failure);
        if let Some(ref id) = id {
            require_prefix(id, "gene:", "ID", failure);
        }
        let biotype =
            required_single(map, "biotype", failure).and_then(|v| parse_biotype(&v, failure));
        let description = optional_single(map, "description", failure);
        let gene_id = required_single(map, "gene_id", failure);
        let logic_name = required_single(map, "logic_name", failure);
        let version = required_single(map, "version", failure);

        require_single_values(
            map,
            &["ID", "biotype", "description", "gene_id", "logic_name", "version"],
            failure,
        );

        Some(GeneAttributes {
            id: id?,
            biotype: biotype?,
            description,
            gene_id: gene_id?,
            logic_name: logic_name?,
            version: version?,
        })
    }
}

impl TranscriptAttributes {
    /// Applies the gencode-basic transcript schema to a parsed attribute map.
    ///
    /// The `tag` key may carry multiple values; every other key, known to
    /// the schema or not, is held to the single-value constraint.
    pub fn from_map(map: &AttributeMap, failure: &mut ValidationFailure) -> Option<Self> {
        let id = required_single(map, "ID", failure);
        if let Some(ref id) = id {
            require_prefix(id, "transcript:", "ID", failure);
        }
        let parent = required_single(map, "Parent", failure);
        if let Some(ref parent) = parent {
            require_prefix(parent, "gene:", "Parent", failure);
        }
        let name = optional_single(map, "Name", failure);
        let biotype =
            required_single(map, "biotype", failure).and_then(|v| parse_biotype(&v, failure));

        let tags = match map.get("tag") {
            None => {
                failure.push("Missing required attribute 'tag'.".to_string());
                None
            }
            Some(values) => {
                let mut tags = Vec::with_capacity(values.len());
                let mut all_known = true;
                for value in values {
                    match TranscriptTag::from_str(value) {
                        Ok(tag) => tags.push(tag),
                        Err(_) => {
                            failure.push(format!("Unknown transcript tag '{value}'."));
                            all_known = false;
                        }
                    }
                }
                all_known.then_some(tags)
            }
        };

        let transcript_id = required_single(map, "transcript_id", failure);
        let transcript_support_level = optional_single(map, "transcript_support_level", failure);
        let version = required_single(map, "version", failure).and_then(|v| match v.parse() {
            Ok(version) => Some(version),
            Err(_) => {
                failure.push(format!("Attribute 'version' value ('{v}') is not an integer."));
                None
            }
        });

        require_single_values(
            map,
            &[
                "ID",
                "Parent",
                "Name",
                "biotype",
                "transcript_id",
                "transcript_support_level",
                "version",
            ],
            failure,
        );

        Some(TranscriptAttributes {
            id: id?,
            parent: parent?,
            name,
            biotype: biotype?,
            tags: tags?,
            transcript_id: transcript_id?,
            transcript_support_level,
            version: version?,
        })
    }
}
