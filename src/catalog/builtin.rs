//! Compiled-in icon table
//!
//! A fixed hierarchy `group -> (name -> icon)`. Keys are dot-joined paths from
//! the root (`Actions.Execute`); the root's own name is an optional prefix that
//! lookups strip.

use crate::core::icon::Icon;

/// Key of the icon used when nothing better is known for a runnable item
pub const FALLBACK_ICON_KEY: &str = "Actions.Execute";

/// Key of the icon shown on the trailing edit action
pub const EDIT_ICON_KEY: &str = "Actions.Edit";

#[derive(Debug)]
pub struct IconGroup {
    pub name: &'static str,
    pub icons: &'static [BuiltinIcon],
    pub groups: &'static [IconGroup],
}

#[derive(Debug)]
pub struct BuiltinIcon {
    pub name: &'static str,
    /// Resource path of the artwork, when known. Drives the display name.
    pub resource: Option<&'static str>,
}

const fn icon(name: &'static str, resource: &'static str) -> BuiltinIcon {
    BuiltinIcon {
        name,
        resource: Some(resource),
    }
}

const fn bare(name: &'static str) -> BuiltinIcon {
    BuiltinIcon {
        name,
        resource: None,
    }
}

pub static BUILTIN_ICONS: IconGroup = IconGroup {
    name: "Builtin",
    icons: &[],
    groups: &[
        IconGroup {
            name: "Actions",
            icons: &[
                icon("Execute", "/actions/execute.svg"),
                icon("StartDebugger", "/actions/startDebugger.svg"),
                icon("Restart", "/actions/restart.svg"),
                icon("Rerun", "/actions/rerun.svg"),
                icon("Suspend", "/actions/suspend.svg"),
                icon("Resume", "/actions/resume.svg"),
                icon("Compile", "/actions/compile.svg"),
                icon("Profile", "/actions/profile.svg"),
                icon("Edit", "/actions/edit.svg"),
                icon("Refresh", "/actions/refresh.svg"),
                icon("Find", "/actions/find.svg"),
                icon("Install", "/actions/install.svg"),
                bare("GC"),
            ],
            groups: &[],
        },
        IconGroup {
            name: "General",
            icons: &[
                icon("Settings", "/general/settings.svg"),
                icon("Add", "/general/add.svg"),
                icon("Remove", "/general/remove.svg"),
                icon("Drag", "/general/drag.svg"),
                icon("BalloonInformation", "/general/balloonInformation.svg"),
                icon("Warning", "/general/warning.svg"),
                icon("Error", "/general/error.svg"),
                bare("ExternalTools"),
            ],
            groups: &[],
        },
        IconGroup {
            name: "Nodes",
            icons: &[
                icon("Folder", "/nodes/folder.svg"),
                icon("Module", "/nodes/module.svg"),
                icon("Plugin", "/nodes/plugin.svg"),
                icon("Console", "/nodes/console.svg"),
                icon("Deploy", "/nodes/deploy.svg"),
            ],
            groups: &[],
        },
        IconGroup {
            name: "FileTypes",
            icons: &[
                icon("Text", "/fileTypes/text.svg"),
                icon("Json", "/fileTypes/json.svg"),
                icon("Xml", "/fileTypes/xml.svg"),
                icon("Yaml", "/fileTypes/yaml.svg"),
                icon("Html", "/fileTypes/html.svg"),
                bare("Any_type"),
            ],
            groups: &[],
        },
        IconGroup {
            name: "RunConfigurations",
            icons: &[
                icon("Application", "/runConfigurations/application.svg"),
                icon("Junit", "/runConfigurations/junit.svg"),
                icon("Remote", "/runConfigurations/remote.svg"),
                icon("Compound", "/runConfigurations/compound.svg"),
                icon("Web_app", "/runConfigurations/web_app.svg"),
                bare("TestUnknown"),
            ],
            groups: &[IconGroup {
                name: "TestState",
                icons: &[
                    icon("Green2", "/runConfigurations/testState/green2.svg"),
                    icon("Red2", "/runConfigurations/testState/red2.svg"),
                    icon("Run", "/runConfigurations/testState/run.svg"),
                ],
                groups: &[],
            }],
        },
        IconGroup {
            name: "Debugger",
            icons: &[
                icon("Db_set_breakpoint", "/debugger/db_set_breakpoint.svg"),
                icon("Console", "/debugger/console.svg"),
            ],
            groups: &[],
        },
    ],
};

/// An icon constant found while walking a table
#[derive(Debug, Clone)]
pub struct TableLeaf {
    pub key: String,
    pub name: &'static str,
    pub resource: Option<&'static str>,
}

impl TableLeaf {
    pub fn to_icon(&self) -> Icon {
        Icon::builtin(&self.key, self.resource)
    }
}

impl IconGroup {
    /// All leaves in declaration order, keyed without the root name
    pub fn leaves(&self) -> Vec<TableLeaf> {
        let mut out = Vec::new();
        self.collect_leaves("", &mut out);
        out
    }

    fn collect_leaves(&self, prefix: &str, out: &mut Vec<TableLeaf>) {
        for leaf in self.icons {
            out.push(TableLeaf {
                key: join_key(prefix, leaf.name),
                name: leaf.name,
                resource: leaf.resource,
            });
        }
        for group in self.groups {
            group.collect_leaves(&join_key(prefix, group.name), out);
        }
    }

    /// Resolve a dotted key such as `Actions.Execute` or `Builtin.Actions.Execute`
    pub fn lookup(&self, raw_key: &str) -> Option<TableLeaf> {
        let key = raw_key
            .strip_prefix(self.name)
            .and_then(|rest| rest.strip_prefix('.'))
            .unwrap_or(raw_key);

        let parts: Vec<&str> = key.split('.').filter(|p| !p.is_empty()).collect();
        let (leaf_name, group_path) = parts.split_last()?;

        let mut group = self;
        for part in group_path {
            group = group.groups.iter().find(|g| g.name == *part)?;
        }

        let leaf = group.icons.iter().find(|i| i.name == *leaf_name)?;
        Some(TableLeaf {
            key: parts.join("."),
            name: leaf.name,
            resource: leaf.resource,
        })
    }
}

fn join_key(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", prefix, name)
    }
}
