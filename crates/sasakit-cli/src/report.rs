use sasakit::workflows::area::AreaReport;
use std::io::{self, Write};
use std::path::Path;

/// Writes the area block of one structure, ending with a blank line.
///
/// Chain and residue lines appear only when the report carries them.
pub fn write_block<W: Write>(out: &mut W, path: &Path, report: &AreaReport) -> io::Result<()> {
    writeln!(out, "Structure: {}", path.display())?;
    writeln!(out, "Total SASA:     {}", report.area.total)?;
    writeln!(out, "Non-polar SASA: {}", report.area.apolar)?;
    writeln!(out, "Polar SASA:     {}", report.area.polar)?;

    for chain in &report.chains {
        writeln!(
            out,
            "  Chain {}: total {} non-polar {} polar {}",
            chain.chain_id, chain.area.total, chain.area.apolar, chain.area.polar
        )?;
    }
    for residue in &report.residues {
        writeln!(
            out,
            "  {} {:>5} {}: total {} non-polar {} polar {}",
            residue.chain_id,
            residue.residue_number,
            residue.residue_name,
            residue.area.total,
            residue.area.apolar,
            residue.area.polar
        )?;
    }

    writeln!(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sasakit::engine::result::{ChainArea, ClassifiedArea, ResidueArea};

    fn report(total: f64, apolar: f64, polar: f64) -> AreaReport {
        AreaReport {
            structure_name: "x".to_string(),
            atom_count: 1,
            area: ClassifiedArea {
                total,
                apolar,
                polar,
                ..Default::default()
            },
            chains: Vec::new(),
            residues: Vec::new(),
        }
    }

    fn render(path: &str, report: &AreaReport) -> String {
        let mut out = Vec::new();
        write_block(&mut out, Path::new(path), report).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn writes_reference_block_exactly() {
        let text = render("x.pdb", &report(5000.0, 3000.0, 2000.0));
        assert_eq!(
            text,
            "Structure: x.pdb\n\
             Total SASA:     5000\n\
             Non-polar SASA: 3000\n\
             Polar SASA:     2000\n\
             \n"
        );
    }

    #[test]
    fn echoes_path_verbatim_and_uses_default_float_display() {
        let text = render("./data/../1ubq.pdb", &report(4834.5, 2712.25, 2122.25));
        assert!(text.starts_with("Structure: ./data/../1ubq.pdb\n"));
        assert!(text.contains("Total SASA:     4834.5\n"));
        assert!(text.contains("Non-polar SASA: 2712.25\n"));
    }

    #[test]
    fn breakdown_lines_sit_between_polar_line_and_blank_line() {
        let area = ClassifiedArea {
            total: 3.0,
            apolar: 2.0,
            polar: 1.0,
            ..Default::default()
        };
        let mut r = report(3.0, 2.0, 1.0);
        r.chains.push(ChainArea {
            chain_id: 'A',
            n_residues: 1,
            area,
        });
        r.residues.push(ResidueArea {
            chain_id: 'A',
            residue_name: "GLY".to_string(),
            residue_number: "12".to_string(),
            n_atoms: 4,
            area,
        });

        let text = render("x.pdb", &r);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[3], "Polar SASA:     1");
        assert_eq!(lines[4], "  Chain A: total 3 non-polar 2 polar 1");
        assert_eq!(lines[5], "  A    12 GLY: total 3 non-polar 2 polar 1");
        assert_eq!(lines[6], "");
        assert!(text.ends_with("\n\n"));
    }
}
