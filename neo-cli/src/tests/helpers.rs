//! Test helpers that lay out small NEO datasets on disk.

use super::{ARG_CADFILE, ARG_NEOFILE};
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use tempfile::TempDir;

const NEOS_CSV: &str = "\
pdes,name,pha,diameter
433,Eros,N,16.84
99942,Apophis,Y,
2019 AA,,N,
";

const CAD_JSON: &str = r#"{
  "fields": ["des", "orbit_id", "jd", "cd", "dist", "dist_min", "dist_max", "v_rel"],
  "data": [
    ["433", "657", "2442435.82", "1975-Jan-23 07:43", "0.151", "0.150", "0.152", "5.4"],
    ["99942", "220", "2462240.41", "2029-Apr-13 21:46", "0.000254", "0.000253", "0.000255", "7.42"],
    ["433", "657", "2457774.70", "2056-Jan-24 04:29", "0.1745", "0.1744", "0.1746", "5.83"],
    ["2015 XR", "1", "2457383.95", "2015-Dec-22 10:49", "0.0329", "0.0328", "0.0330", "6.16"]
  ]
}"#;

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    fs::write(path.as_std_path(), contents).expect("write test file");
}

/// NEO and close-approach files in a temporary directory.
#[derive(Debug)]
pub(super) struct SampleDataset {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl SampleDataset {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        write_utf8(&root.join("neos.csv"), NEOS_CSV.as_bytes());
        write_utf8(&root.join("cad.json"), CAD_JSON.as_bytes());
        Self { _dir: dir, root }
    }

    pub(super) fn root(&self) -> &Utf8Path {
        &self.root
    }

    pub(super) fn neofile(&self) -> Utf8PathBuf {
        self.root.join("neos.csv")
    }

    pub(super) fn cadfile(&self) -> Utf8PathBuf {
        self.root.join("cad.json")
    }

    /// Leading `--neofile`/`--cadfile` flags for a subcommand invocation.
    pub(super) fn source_flags(&self) -> Vec<String> {
        vec![
            format!("--{ARG_NEOFILE}"),
            self.neofile().into_string(),
            format!("--{ARG_CADFILE}"),
            self.cadfile().into_string(),
        ]
    }
}
