//! Container layout on disk.
//!
//! Every path is a pure function of the output root, the flatten flag, the
//! server name and the person id:
//!
//! ```text
//! {root}/ldpc-{server}/          (or {root}/ when flattened)
//! └── {id}
//!     ├── little-sister
//!     │   ├── graph-comments
//!     │   ├── graph-nodes
//!     │   ├── inbox
//!     │   └── sensor            (only with a sensor)
//!     └── profile
//!         └── card
//! ```

use std::path::PathBuf;

const APP_DIR: &str = "little-sister";

/// Maps servers and people to container paths under an output root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    output_root: PathBuf,
    flatten: bool,
}

/// The directories and document paths making up one person's container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonLayout {
    /// Directories in creation order (parents before children).
    pub dirs: Vec<PathBuf>,
    pub inbox: PathBuf,
    pub sensor: Option<PathBuf>,
    pub card: PathBuf,
}

impl Layout {
    pub fn new(output_root: impl Into<PathBuf>, flatten: bool) -> Self {
        Self {
            output_root: output_root.into(),
            flatten,
        }
    }

    /// Root container of a server.
    pub fn base_path(&self, server_name: &str) -> PathBuf {
        if self.flatten {
            self.output_root.clone()
        } else {
            self.output_root.join(format!("ldpc-{server_name}"))
        }
    }

    pub fn person_path(&self, server_name: &str, id: &str) -> PathBuf {
        self.base_path(server_name).join(id)
    }

    pub fn person_layout(&self, server_name: &str, id: &str, has_sensor: bool) -> PersonLayout {
        let person = self.person_path(server_name, id);
        let app = person.join(APP_DIR);
        let profile = person.join("profile");

        PersonLayout {
            dirs: vec![
                person,
                app.clone(),
                app.join("graph-comments"),
                app.join("graph-nodes"),
                profile.clone(),
            ],
            inbox: app.join("inbox"),
            sensor: has_sensor.then(|| app.join("sensor")),
            card: profile.join("card"),
        }
    }
}
