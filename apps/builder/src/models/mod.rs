pub mod resume;

pub use resume::{
    EducationEntry, Experience, Identity, ProjectEntry, ResumeDocument, ResumePatch, Sector,
};
