//! Course module catalog
//!
//! The five modules of the assembly-language course. Quiz generation is
//! keyed by module id; the backend owns the question content.

/// One course module
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CourseModule {
    /// Module id as the backend expects it ("1".."5")
    pub id: &'static str,
    /// Display name
    pub name: &'static str,
}

/// All course modules, in course order
pub fn course_modules() -> &'static [CourseModule] {
    &[
        CourseModule {
            id: "1",
            name: "Introduction to Computer Architecture",
        },
        CourseModule {
            id: "2",
            name: "MIPS Introduction, ALU and Data Transfer",
        },
        CourseModule {
            id: "3",
            name: "Branch Instructions and Machine Code",
        },
        CourseModule {
            id: "4",
            name: "Functions and Procedures",
        },
        CourseModule {
            id: "5",
            name: "Arrays and Pointers",
        },
    ]
}

/// Look up a module by id
pub fn find_module(id: &str) -> Option<&'static CourseModule> {
    course_modules().iter().find(|m| m.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_module() {
        assert_eq!(find_module("1").unwrap().name, "Introduction to Computer Architecture");
        assert_eq!(find_module("5").unwrap().name, "Arrays and Pointers");
        assert!(find_module("6").is_none());
        assert!(find_module("").is_none());
    }

    #[test]
    fn test_catalog_is_ordered() {
        let ids: Vec<&str> = course_modules().iter().map(|m| m.id).collect();
        assert_eq!(ids, vec!["1", "2", "3", "4", "5"]);
    }
}
