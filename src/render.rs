//! Plain-text rendering of reports, overviews and result tables

use std::fmt::{self, Display, Formatter};

use crate::audit::{
    AuditReport, CollectionAudit, OwnerFilter, OwnerStatus, RecordDetail, ResultSummary,
};
use crate::document::codes::MaterialType;
use crate::document::{Collection, Identified, JsafDocument, ResultRecord};
use crate::index::{truncate_id, IdIndex, ModelIndex};
use crate::overview::ModelOverview;

/// Default number of errors and of warnings listed in a text report
pub const DEFAULT_MAX_LISTED: usize = 20;

/// Id characters shown for an unnamed load case in a combination
pub const COMBINATION_ID_LEN: usize = 12;

/// Render an audit report, listing at most `max_listed` errors and warnings
pub fn render_report(report: &AuditReport, max_listed: usize) -> String {
    ReportText { report, max_listed }.to_string()
}

pub fn render_overview(overview: &ModelOverview) -> String {
    OverviewText(overview).to_string()
}

/// Render the owner table of a result summary
///
/// `owners` supplies the names shown next to the owner ids.
pub fn render_owner_table(
    summary: &ResultSummary,
    filter: OwnerFilter,
    owners: &IdIndex,
) -> String {
    OwnerTableText {
        summary,
        filter,
        owners,
    }
    .to_string()
}

pub fn render_record_detail(detail: &RecordDetail, owner_name: &str, load_name: &str) -> String {
    RecordText {
        detail,
        owner_name,
        load_name,
    }
    .to_string()
}

/// Render every load combination with its factored load cases
pub fn render_combinations(doc: &JsafDocument, index: &ModelIndex) -> String {
    CombinationText { doc, index }.to_string()
}

/// Render the records of one collection as a table
///
/// Referenced ids are shown by the name of the record they point to.
pub fn render_entities(doc: &JsafDocument, index: &ModelIndex, collection: Collection) -> String {
    EntityText {
        doc,
        index,
        collection,
    }
    .to_string()
}

fn write_listed<T: Display>(f: &mut Formatter<'_>, items: &[T], max_listed: usize) -> fmt::Result {
    for item in items.iter().take(max_listed) {
        writeln!(f, "  - {item}")?;
    }
    if items.len() > max_listed {
        writeln!(f, "  ... and {} more", items.len() - max_listed)?;
    }
    Ok(())
}

fn write_collection_line(f: &mut Formatter<'_>, audit: &CollectionAudit) -> fmt::Result {
    let counts = audit.counts();
    writeln!(
        f,
        "{}: {} records ({} complete, {} partial, {} empty), {} owners, {} orphaned",
        audit.collection(),
        counts.total,
        counts.complete,
        counts.partial,
        counts.empty,
        audit.summary.owners.len(),
        audit.orphans.count()
    )
}

struct ReportText<'a> {
    report: &'a AuditReport,
    max_listed: usize,
}

impl Display for ReportText<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let report = self.report;
        let name = if report.model_name.is_empty() {
            "unnamed model"
        } else {
            report.model_name.as_str()
        };
        writeln!(f, "Audit of {name}")?;

        if report.is_clean() {
            writeln!(f, "No problems found.")?;
        }
        if !report.errors.is_empty() {
            writeln!(f, "Errors: {}", report.error_count())?;
            write_listed(f, &report.errors, self.max_listed)?;
        }
        if !report.warnings.is_empty() {
            writeln!(f, "Warnings: {}", report.warning_count())?;
            write_listed(f, &report.warnings, self.max_listed)?;
        }

        writeln!(f)?;
        write_collection_line(f, &report.results_1d)?;
        write_collection_line(f, &report.mesh_results)
    }
}

struct OverviewText<'a>(&'a ModelOverview);

impl Display for OverviewText<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let overview = self.0;
        let name = if overview.name.is_empty() {
            "N/A"
        } else {
            overview.name.as_str()
        };
        writeln!(f, "{name}")?;
        if !overview.description.is_empty() {
            writeln!(f, "{}", overview.description)?;
        }

        for group in &overview.groups {
            writeln!(f)?;
            writeln!(f, "{}", group.title().to_uppercase())?;
            for count in &group.counts {
                writeln!(f, "  {:<18}{:>8}", count.label, count.count)?;
            }
        }

        for (title, types) in [
            ("Materials by type", &overview.material_types),
            ("Bars by type", &overview.bar_types),
            ("Surfaces by type", &overview.surface_types),
        ] {
            if types.is_empty() {
                continue;
            }
            writeln!(f)?;
            writeln!(f, "{title}")?;
            for (label, count) in types {
                writeln!(f, "  {label:<18}{count:>8}")?;
            }
        }
        Ok(())
    }
}

struct OwnerTableText<'a> {
    summary: &'a ResultSummary,
    filter: OwnerFilter,
    owners: &'a IdIndex,
}

impl Display for OwnerTableText<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let rows = self.summary.owner_rows(self.filter);
        write!(f, "{:<12}{:<20}{:<12}{:>8}{:>8}", "Owner", "Name", "Status", "Values", "Zero")?;
        for component in self.summary.components {
            write!(f, "{component:>12}")?;
        }
        writeln!(f)?;

        for row in &rows {
            let status = match row.status {
                OwnerStatus::HasValues => "values",
                OwnerStatus::AllZero => "all zero",
            };
            write!(
                f,
                "{:<12}{:<20}{:<12}{:>8}{:>8}",
                row.owner,
                self.owners.name(row.owner).unwrap_or("-"),
                status,
                row.summary.nonzero,
                row.summary.zero
            )?;
            for component in self.summary.components {
                write!(f, "{:>12.3}", row.summary.max_of(component))?;
            }
            writeln!(f)?;
        }
        writeln!(f, "{} of {} owners", rows.len(), self.summary.owners.len())
    }
}

struct RecordText<'a> {
    detail: &'a RecordDetail,
    owner_name: &'a str,
    load_name: &'a str,
}

impl Display for RecordText<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let detail = self.detail;
        writeln!(
            f,
            "'{}' under '{}': {} ({}/{} components)",
            self.owner_name,
            self.load_name,
            detail.completeness.label(),
            detail.nonzero_components,
            detail.component_count
        )?;
        if !detail.positions.is_empty() {
            let positions: Vec<String> =
                detail.positions.iter().map(|p| format!("{p:.3}")).collect();
            writeln!(f, "Sections at: {}", positions.join(", "))?;
        }
        for component in &detail.components {
            let min = component.min.map_or_else(|| "-".to_string(), |v| format!("{v:.3}"));
            let max = component.max.map_or_else(|| "-".to_string(), |v| format!("{v:.3}"));
            writeln!(
                f,
                "  {:<6}{:>6}{:>14}{:>14}  {}",
                component.name,
                component.len,
                min,
                max,
                if component.nonzero { "non-zero" } else { "zero" }
            )?;
        }
        Ok(())
    }
}

struct CombinationText<'a> {
    doc: &'a JsafDocument,
    index: &'a ModelIndex,
}

impl Display for CombinationText<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for combo in self.doc.load_combinations() {
            writeln!(f, "{} ({})", combo.label(), combo.category_label())?;
            for entry in combo.entries() {
                let factor = entry.factor.map_or_else(|| "?".to_string(), |v| v.to_string());
                let multiplier = entry
                    .multiplier
                    .map_or_else(|| "?".to_string(), |v| v.to_string());
                writeln!(
                    f,
                    "  {:<24} factor {:>6}  mult. {:>6}",
                    self.index
                        .load_cases
                        .name(entry.load_case)
                        .unwrap_or_else(|| truncate_id(entry.load_case, COMBINATION_ID_LEN)),
                    factor,
                    multiplier
                )?;
            }
        }
        Ok(())
    }
}

/// Stress and stiffness values above 1000 are taken as Pa and shown in MPa
fn mpa(value: f64) -> f64 {
    if value > 1000.0 {
        value / 1e6
    } else {
        value
    }
}

/// Unit masses above 100 are taken as weight densities in N/m3
fn density(unit_mass: f64) -> f64 {
    if unit_mass > 100.0 {
        unit_mass / 9.81
    } else {
        unit_mass
    }
}

fn join_names<'a>(index: &'a IdIndex, ids: &'a [String]) -> String {
    ids.iter()
        .map(|id| index.display_name(id))
        .collect::<Vec<_>>()
        .join(", ")
}

struct EntityText<'a> {
    doc: &'a JsafDocument,
    index: &'a ModelIndex,
    collection: Collection,
}

impl EntityText<'_> {
    fn case_name(&self, id: &str) -> &str {
        self.index.load_cases.name(id).unwrap_or("?")
    }

    fn write_materials(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:<20}{:<12}{:>10}{:>10}{:>8}{:>10}  Strength (MPa)",
            "Name", "Type", "E (MPa)", "G (MPa)", "nu", "rho"
        )?;
        for material in self.doc.materials() {
            let strength = match material.kind() {
                Some(MaterialType::Concrete) => format!("fck {:.1}", mpa(material.fck)),
                Some(MaterialType::Steel) => {
                    format!("fy {:.1}, fu {:.1}", mpa(material.fy), mpa(material.fu))
                }
                _ => "-".to_string(),
            };
            writeln!(
                f,
                "{:<20}{:<12}{:>10.1}{:>10.1}{:>8}{:>10.1}  {}",
                material.label(),
                material.type_label(),
                mpa(material.e_modulus),
                mpa(material.g_modulus),
                material.poisson_coefficient,
                density(material.unit_mass),
                strength
            )?;
        }
        Ok(())
    }

    fn write_cross_sections(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:<20}{:<16}{:<16}{:<28}Materials", "Name", "Type", "Shape", "Parameters (m)")?;
        for section in self.doc.cross_sections() {
            let parameters: Vec<String> =
                section.parameters.iter().map(|p| format!("{p:.3}")).collect();
            writeln!(
                f,
                "{:<20}{:<16}{:<16}{:<28}{}",
                section.label(),
                section.type_label(),
                section.shape_label(),
                parameters.join(", "),
                join_names(&self.index.materials, &section.materials)
            )?;
        }
        Ok(())
    }

    fn write_nodes(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:<12}{:<20}{:>10}{:>10}{:>10}", "Id", "Name", "X", "Y", "Z")?;
        for node in self.doc.nodes() {
            let [x, y, z] = node.coords();
            writeln!(f, "{:<12}{:<20}{x:>10.3}{y:>10.3}{z:>10.3}", node.id, node.name)?;
        }
        Ok(())
    }

    fn write_bars(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:<12}{:<20}{:<12}{:<20}Nodes", "Id", "Name", "Type", "Section")?;
        for bar in self.doc.bars() {
            writeln!(
                f,
                "{:<12}{:<20}{:<12}{:<20}{}",
                bar.id,
                bar.name,
                bar.type_label(),
                self.index.cross_sections.name(&bar.cross_section).unwrap_or("N/A"),
                bar.nodes.join(" -> ")
            )?;
        }
        Ok(())
    }

    fn write_surfaces(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:<12}{:<20}{:<12}{:>10}{:>7}  Materials",
            "Id", "Name", "Type", "Thickness", "Nodes"
        )?;
        for surface in self.doc.surfaces() {
            writeln!(
                f,
                "{:<12}{:<20}{:<12}{:>10.3}{:>7}  {}",
                surface.id,
                surface.name,
                surface.type_label(),
                surface.thickness,
                surface.nodes.len(),
                join_names(&self.index.materials, &surface.materials)
            )?;
        }
        Ok(())
    }

    fn write_openings(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:<20}{:<20}Nodes", "Name", "Surface")?;
        for opening in self.doc.openings() {
            writeln!(
                f,
                "{:<20}{:<20}{}",
                opening.label(),
                self.index.surfaces.display_name(&opening.surface),
                opening.nodes.join(" -> ")
            )?;
        }
        Ok(())
    }

    fn write_supports(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:<20}{:<12}{:<12}{:<12}{:<12}{:<12}{:<12}{:<12}",
            "Name", "Node", "Ux", "Uy", "Uz", "Rx", "Ry", "Rz"
        )?;
        for support in self.doc.supports() {
            write!(f, "{:<20}{:<12}", support.label(), support.node)?;
            let translations = support.translation_labels();
            let rotations = support.rotation_labels();
            for label in translations.iter().chain(&rotations) {
                write!(f, "{label:<12}")?;
            }
            if !support.is_supported() {
                write!(f, "(no restraint)")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }

    fn write_load_cases(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:<24}{:<16}Type", "Name", "Action")?;
        for case in self.doc.load_cases() {
            writeln!(
                f,
                "{:<24}{:<16}{}",
                case.label(),
                case.action_label(),
                case.type_label()
            )?;
        }
        Ok(())
    }

    fn write_point_actions(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:<20}{:<12}{:<10}{:>10}{:>10}{:>10}  Case",
            "Name", "Node", "System", "X", "Y", "Z"
        )?;
        for action in self.doc.point_actions() {
            writeln!(
                f,
                "{:<20}{:<12}{:<10}{:>10.3}{:>10.3}{:>10.3}  {}",
                action.label(),
                action.reference_node,
                action.coordinate_label(),
                action.x,
                action.y,
                action.z,
                self.case_name(&action.load_case)
            )?;
        }
        Ok(())
    }

    fn write_curve_actions(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:<20}{:<12}{:<14}{:>10}{:>10}{:>10}  Case",
            "Name", "Bar", "Distribution", "X", "Y", "Z"
        )?;
        for action in self.doc.curve_actions() {
            writeln!(
                f,
                "{:<20}{:<12}{:<14}{:>10.3}{:>10.3}{:>10.3}  {}",
                action.label(),
                action.curve_member,
                action.distribution_label(),
                action.x,
                action.y,
                action.z,
                self.case_name(&action.load_case)
            )?;
        }
        Ok(())
    }

    fn write_surface_actions(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:<20}{:<12}{:>10}{:>10}{:>10}  Case",
            "Name", "Surface", "Qx", "Qy", "Qz"
        )?;
        for action in self.doc.surface_actions() {
            writeln!(
                f,
                "{:<20}{:<12}{:>10.3}{:>10.3}{:>10.3}  {}",
                action.label(),
                action.surface_element,
                action.qx,
                action.qy,
                action.qz,
                self.case_name(&action.load_case)
            )?;
        }
        Ok(())
    }

    fn write_results<R: ResultRecord>(
        &self,
        f: &mut Formatter<'_>,
        records: &[R],
        owners: &IdIndex,
    ) -> fmt::Result {
        writeln!(f, "{:<12}{:<20}{:<24}", "Owner", "Name", "Load")?;
        for record in records {
            writeln!(
                f,
                "{:<12}{:<20}{:<24}",
                record.owner_id(),
                owners.name(record.owner_id()).unwrap_or("-"),
                self.index.load_display_name(record.load_id())
            )?;
        }
        Ok(())
    }
}

impl Display for EntityText<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let len = self.doc.collection_len(self.collection).unwrap_or(0);
        writeln!(f, "{} ({len})", self.collection)?;
        if len == 0 {
            return Ok(());
        }
        match self.collection {
            Collection::Materials => self.write_materials(f),
            Collection::CrossSections => self.write_cross_sections(f),
            Collection::PointConnections => self.write_nodes(f),
            Collection::CurveMembers => self.write_bars(f),
            Collection::SurfaceMembers => self.write_surfaces(f),
            Collection::SurfaceMemberOpenings => self.write_openings(f),
            Collection::PointSupports => self.write_supports(f),
            Collection::LoadCases => self.write_load_cases(f),
            Collection::LoadCombinations => CombinationText {
                doc: self.doc,
                index: self.index,
            }
            .fmt(f),
            Collection::PointActions => self.write_point_actions(f),
            Collection::CurveActions => self.write_curve_actions(f),
            Collection::SurfaceActions => self.write_surface_actions(f),
            Collection::Results1D => {
                self.write_results(f, self.doc.results_1d(), &self.index.bars)
            }
            Collection::MeshResults => {
                self.write_results(f, self.doc.mesh_results(), &self.index.surfaces)
            }
        }
    }
}
