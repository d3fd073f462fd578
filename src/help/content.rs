use super::{HelpBook, HelpFlag, HelpTopic, Section};

pub(crate) fn book() -> HelpBook<'static> {
    HelpBook {
        title: "Pocket Notes",
        usage: "pn <command> [options]",
        topics: ALL_TOPICS,
        footer: &["Use `pn help <command>` for details, e.g. `pn help list` or `pn help browse`."],
    }
}

const SORT_FLAG: HelpFlag<'static> = HelpFlag {
    name: "--sort <mode>",
    desc: "pinned|newest|oldest|az|za (default pinned: pinned first, then newest)",
};

const ALL_TOPICS: &[HelpTopic<'static>] = &[
    HelpTopic {
        name: "add",
        summary: "Create a note with a title and optional body.",
        usage: "pn add <title> [body...]",
        details: &[
            "Titles are required and limited to 100 characters; bodies to 5000.",
            "Words after the title are joined with spaces to form the body.",
        ],
        flags: &[],
        section: Section::Command,
        examples: &["pn add Milk \"buy milk\""],
    },
    HelpTopic {
        name: "list",
        summary: "List notes, optionally filtered and sorted.",
        usage: "pn list [-s text] [--sort mode] [--plain]",
        details: &[
            "Search text matches title or body, ignoring case.",
            "Pinned notes are marked with `*`.",
        ],
        flags: &[
            HelpFlag { name: "-s, --search <text>", desc: "Only notes containing the text" },
            SORT_FLAG,
            HelpFlag { name: "--plain", desc: "Disable color" },
        ],
        section: Section::Command,
        examples: &["pn list -s milk --sort az"],
    },
    HelpTopic {
        name: "view",
        summary: "Show one note.",
        usage: "pn view <id> [--plain]",
        details: &[],
        flags: &[HelpFlag { name: "--plain", desc: "Disable color" }],
        section: Section::Command,
        examples: &[],
    },
    HelpTopic {
        name: "edit",
        summary: "Change a note's title or body.",
        usage: "pn edit <id> [--title text] [--body text]",
        details: &[
            "Without flags the note opens in $EDITOR (default vi) as a `Title:` line, a `---` line, and the body.",
            "The same limits as `add` apply; the updated time is refreshed.",
        ],
        flags: &[
            HelpFlag { name: "--title <text>", desc: "New title" },
            HelpFlag { name: "--body <text>", desc: "New body" },
        ],
        section: Section::Command,
        examples: &["pn edit 3f2c... --title \"Groceries\""],
    },
    HelpTopic {
        name: "pin",
        summary: "Pin or unpin a note.",
        usage: "pn pin <id>",
        details: &[],
        flags: &[],
        section: Section::Command,
        examples: &[],
    },
    HelpTopic {
        name: "delete",
        summary: "Delete one or more notes.",
        usage: "pn delete <id>...",
        details: &["Use `:delete` inside `pn browse` for a delete that can be undone."],
        flags: &[],
        section: Section::Command,
        examples: &[],
    },
    HelpTopic {
        name: "clear",
        summary: "Delete every note.",
        usage: "pn clear",
        details: &["Sample notes are not written again afterwards."],
        flags: &[],
        section: Section::Command,
        examples: &[],
    },
    HelpTopic {
        name: "browse",
        summary: "Interactive list with debounced search.",
        usage: "pn browse [--sort mode]",
        details: &[
            "Each input line is a search query; results print once typing pauses.",
            "Commands: `:sort <mode>`, `:pin <id>`, `:delete <id>`, `:undo`, `:refresh`, `:quit`.",
            "`:undo` restores the last deleted note if nothing else changed since.",
        ],
        flags: &[SORT_FLAG],
        section: Section::Command,
        examples: &[],
    },
    HelpTopic {
        name: "theme",
        summary: "Show or set the light/dark override.",
        usage: "pn theme [light|dark|system]",
        details: &["`system` removes the override and follows POCKET_NOTES_SYSTEM_THEME."],
        flags: &[],
        section: Section::Command,
        examples: &["pn theme dark"],
    },
    HelpTopic {
        name: "doctor",
        summary: "Check whether stored notes are readable.",
        usage: "pn doctor",
        details: &["Exits non-zero when the stored collection cannot be parsed."],
        flags: &[],
        section: Section::Command,
        examples: &[],
    },
    HelpTopic {
        name: "path",
        summary: "Print the data directory.",
        usage: "pn path",
        details: &[],
        flags: &[],
        section: Section::Command,
        examples: &[],
    },
    HelpTopic {
        name: "POCKET_NOTES_DIR",
        summary: "Data directory (default ~/.pocket_notes)",
        usage: "POCKET_NOTES_DIR",
        details: &[],
        flags: &[],
        section: Section::Environment,
        examples: &[],
    },
    HelpTopic {
        name: "POCKET_NOTES_SYSTEM_THEME",
        summary: "light|dark scheme used when no override is set",
        usage: "POCKET_NOTES_SYSTEM_THEME",
        details: &[],
        flags: &[],
        section: Section::Environment,
        examples: &[],
    },
    HelpTopic {
        name: "POCKET_NOTES_NO_SEED",
        summary: "Skip writing the sample notes on first run",
        usage: "POCKET_NOTES_NO_SEED",
        details: &[],
        flags: &[],
        section: Section::Environment,
        examples: &[],
    },
    HelpTopic {
        name: "POCKET_NOTES_QUOTA_BYTES",
        summary: "Largest stored value in bytes (default 6 MiB, `none` to disable)",
        usage: "POCKET_NOTES_QUOTA_BYTES",
        details: &[],
        flags: &[],
        section: Section::Environment,
        examples: &[],
    },
    HelpTopic {
        name: "POCKET_NOTES_DEBOUNCE_MS",
        summary: "Search pause for browse, in milliseconds (default 250)",
        usage: "POCKET_NOTES_DEBOUNCE_MS",
        details: &[],
        flags: &[],
        section: Section::Environment,
        examples: &[],
    },
    HelpTopic {
        name: "POCKET_NOTES_LOG",
        summary: "Log filter written to stderr, e.g. debug (default warn)",
        usage: "POCKET_NOTES_LOG",
        details: &[],
        flags: &[],
        section: Section::Environment,
        examples: &[],
    },
    HelpTopic {
        name: "NO_COLOR",
        summary: "Disable colored output",
        usage: "NO_COLOR",
        details: &[],
        flags: &[],
        section: Section::Environment,
        examples: &[],
    },
];
