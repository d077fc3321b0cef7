//! Canned lines and prompt guidance per role.
//!
//! Each role maps to one `RoleScript`. Defense lines carry an `{accuser}`
//! placeholder that is replaced with the accusing seat.

use crate::core::{PlayerId, Role};

/// Placeholder substituted in defense templates.
pub const ACCUSER_SLOT: &str = "{accuser}";

/// Evidence words an Impostor must never use in a report.
pub const IMPOSTOR_FORBIDDEN: &[&str] = &[
    "timestamp",
    "recording",
    "trajectory log",
    "wrench position",
    "raw vital sign data",
];

/// Used when a role has no line to offer.
pub const GENERIC_REPORT: &str = "Inspecting equipment, no abnormalities found";
pub const GENERIC_DEFENSE: &str =
    "I have evidence of my innocence! {accuser} accuses without proof and looks more like the impostor!";

/// Everything narration needs to know about one role.
#[derive(Debug)]
pub struct RoleScript {
    pub reports: &'static [&'static str],
    pub defenses: &'static [&'static str],
    /// A Crewmate report must mention at least one of these.
    pub keywords: &'static [&'static str],
    /// Extra instructions for a live report prompt.
    pub report_brief: &'static str,
    /// Extra instructions for a live defense prompt.
    pub defense_brief: &'static str,
}

impl RoleScript {
    /// Fill a defense template for the given accuser.
    #[must_use]
    pub fn fill(template: &str, accuser: PlayerId) -> String {
        template.replace(ACCUSER_SLOT, &accuser.to_string())
    }
}

/// Script for a role.
#[must_use]
pub fn script(role: Role) -> &'static RoleScript {
    match role {
        Role::EngineerKai => &ENGINEER_KAI,
        Role::CommsOfficerLina => &COMMS_LINA,
        Role::NavigatorElla => &NAVIGATOR_ELLA,
        Role::DoctorMark => &DOCTOR_MARK,
        Role::TechnicianLucy => &TECHNICIAN_LUCY,
        Role::ImpostorVic => &IMPOSTOR_VIC,
        Role::ImpostorZoe => &IMPOSTOR_ZOE,
        Role::ImpostorJack => &IMPOSTOR_JACK,
        Role::ImpostorLily => &IMPOSTOR_LILY,
    }
}

static ENGINEER_KAI: RoleScript = RoleScript {
    reports: &[
        "Calibrating reactor, repair log has a timestamp for verification",
        "Fixed the power supply, oxygen tank valve normal, wrench in place",
        "Came from the storage bay, saw no one, repair recorder is active",
        "Heard the reactor alarm and ran to repair it, operation log saved",
    ],
    defenses: &[
        "I have repair timestamps! {accuser} says I was prepared, but I arrived after the sabotage and the log proves it!",
        "No wrench is missing from the storage bay. {accuser} is lying about my tools, you're the impostor!",
        "My post-repair reactor data is normal. {accuser} is spreading rumors, what are you hiding?",
        "Check the repair recorder yourself. {accuser} can't explain where they were during the alarm!",
    ],
    keywords: &["repair", "timestamp", "reactor", "oxygen tank"],
    report_brief: "You maintain the reactor and oxygen tank and carry a repair recorder. \
        Mention repairs, timestamps, or equipment status. Do not imitate impostor talk.",
    defense_brief: "Use your repair timestamps or the wrench position to prove innocence \
        and point out the impostor's flaws.",
};

static COMMS_LINA: RoleScript = RoleScript {
    reports: &[
        "Communication device has interference, checking the comms bay",
        "Monitored the cafeteria, heard no ventilation shaft opening",
        "Transferring data with Ella, full communication log, no sabotage",
        "Heard metal collision during monitoring, not like crew work",
    ],
    defenses: &[
        "I have comms bay operation logs! {accuser} says I didn't monitor, the recording proves it!",
        "I heard someone imitating Kai's voice while monitoring! {accuser} doesn't question that, but accuses me?",
        "Ella and I transferred data with full logs. {accuser} says I sabotaged, where's the evidence?",
        "The monitoring recording is timestamped. {accuser} should listen before pointing fingers!",
    ],
    keywords: &["monitor", "communication", "interference", "recording"],
    report_brief: "You keep communications running and can monitor areas. Mention monitoring, \
        the comms bay, or the communication log; abnormal sounds are worth reporting.",
    defense_brief: "Use monitoring recordings or comms bay operation logs to prove innocence \
        and counterattack the impostors.",
};

static NAVIGATOR_ELLA: RoleScript = RoleScript {
    reports: &[
        "Course calibrated, movement trajectory saved for verification",
        "Before the oxygen alarm a trajectory signal left the storage bay",
        "Uploading navigation data, closing the redundant hatch, all normal",
        "Checked the course data, one claimed navigation task never happened",
    ],
    defenses: &[
        "The movement trajectory shows {accuser} at the sabotage point before the alarm! Stop shifting blame!",
        "The supply logs were forged and the vent has glove fibers! {accuser} can't see that?",
        "A forged navigation log with no record means the task wasn't done! {accuser} defending that is suspicious!",
        "I have the upload data logs. {accuser} says I faked them, show your evidence!",
    ],
    keywords: &["trajectory", "data", "course", "calibration"],
    report_brief: "You calibrate the course and upload data, and can check movement \
        trajectories. Mention course calibration, trajectories, or data uploads.",
    defense_brief: "Use movement trajectories or forged supply logs as evidence and \
        counterattack the impostors.",
};

static DOCTOR_MARK: RoleScript = RoleScript {
    reports: &[
        "Medical bay physical exams completed, all crew vital signs normal",
        "Detected abnormal vital signs from the storage bay direction",
        "First-aid kits replenished, medical equipment working properly",
        "Just did a physical exam on Ella, she's in good condition",
    ],
    defenses: &[
        "I have physical exam records! {accuser} says I'm the impostor, the vital sign data proves otherwise!",
        "Someone claimed to be in the medical bay and I never saw them! {accuser} don't be fooled!",
        "First-aid kit usage logs are available. {accuser} says I sabotaged equipment, total frame-up!",
        "Every vital sign reading is on file. {accuser} is spreading rumors, you're the impostor!",
    ],
    keywords: &["physical exam", "vital signs", "medical bay", "first-aid kit"],
    report_brief: "You run physical exams and maintain medical equipment. Mention physical \
        exams, vital signs, or the medical bay.",
    defense_brief: "Use physical exam records or vital sign data to prove innocence and \
        counterattack the impostors.",
};

static TECHNICIAN_LUCY: RoleScript = RoleScript {
    reports: &[
        "Circuit system inspection completed, no abnormal access detected",
        "Sensors show abnormal movement in the storage bay",
        "All repair tools in place, none used by impostors",
        "Equipment logs normal, sensor data shows no tampering",
    ],
    defenses: &[
        "I have circuit inspection reports! {accuser} says I sabotaged the system, the equipment logs prove I didn't!",
        "Sensors recorded someone near the ventilation shaft! {accuser} doesn't suspect them, but accuses me?",
        "Complete repair tool checkout logs exist. {accuser} says I stole tools, total nonsense!",
        "No data tampering anywhere. {accuser} is colluding to frame me!",
    ],
    keywords: &["circuit", "sensor", "equipment inspection", "repair tools"],
    report_brief: "You inspect circuits and maintain equipment with sensor logs. Mention \
        circuit inspection, sensors, or equipment status.",
    defense_brief: "Use circuit inspection reports or sensor logs to prove innocence and \
        counterattack the impostors.",
};

static IMPOSTOR_VIC: RoleScript = RoleScript {
    reports: &[
        "I'm fixing the oxygen tank valve, anyone want to help?",
        "Lina is lingering in comms, not acting like troubleshooting",
        "Was in the storage bay with a teammate, we vouch for each other",
        "Kai repairs that reactor too well, like he knew it would break",
    ],
    defenses: &[
        "We vouch for each other in the storage bay! {accuser} says I used the vent, where's the evidence?",
        "Kai knew the reactor fault in advance! {accuser} doesn't question him, but accuses me?",
        "Lina's monitoring has no witnesses, maybe she sabotaged it! {accuser} don't believe her!",
        "I never touched the data bay, that badge is a frame-up! {accuser} is in on it!",
    ],
    keywords: &[],
    report_brief: "You are disguised as a Supply Manager and can use ventilation shafts. \
        Imitate the engineer's repair talk or mention mutual vouching in the storage bay. \
        Never reveal vent use or sabotage.",
    defense_brief: "Quibble with mutual vouching or deny using the vent, counterattack \
        the crew, and shift blame to your teammate if exposed.",
};

static IMPOSTOR_ZOE: RoleScript = RoleScript {
    reports: &[
        "Checked the course, Kai was closest to the reactor sabotage",
        "Calibrating course in navigation, my teammate can vouch for me",
        "Where's Lina's monitoring log? Can't produce it means lying",
        "Ella's course data looks forged, don't believe her",
    ],
    defenses: &[
        "No saved navigation log because of the emergency! {accuser} says I forged it, where's your proof?",
        "Ella's course data is doctored! {accuser} defending her means you're colluding!",
        "Lina's monitoring is fake, she never went to comms! {accuser} don't be fooled!",
        "I was forced to cover for someone! {accuser} should vote for the real culprit!",
    ],
    keywords: &[],
    report_brief: "You are disguised as a Navigator and can forge task logs. Imitate the \
        navigator's course talk or say your teammate can vouch for you. Never reveal forgery.",
    defense_brief: "Use 'no saved log' or 'emergency' as excuses, counterattack the crew, \
        and shift blame to your teammate if exposed.",
};

static IMPOSTOR_JACK: RoleScript = RoleScript {
    reports: &[
        "Patrolling the medical bay, haven't seen Mark anywhere",
        "Detected abnormal readings, must be Lucy's doing",
        "Just examined my teammate, definitely innocent",
        "Medical equipment sabotaged, must be Ella's work",
    ],
    defenses: &[
        "I have medical bay patrol logs! {accuser} says I'm the impostor, what evidence do you have?",
        "Mark's exam records are forged! {accuser} don't be deceived by fake data!",
        "My teammate and I vouch for each other in storage! {accuser} says I used the vent, total frame-up!",
        "Lucy sabotaged the medical equipment and framed me! {accuser} vote for her!",
    ],
    keywords: &[],
    report_brief: "You are disguised as a Doctor and can forge exam records. Imitate the \
        doctor's medical talk or say your teammate can vouch for you. Never reveal forgery.",
    defense_brief: "Use 'emergency' or 'equipment failure' as excuses, counterattack the \
        crew, and shift blame to your teammate if exposed.",
};

static IMPOSTOR_LILY: RoleScript = RoleScript {
    reports: &[
        "Circuit system has issues, Kai broke it during repairs",
        "Sensors show Lina lingering near the ventilation shaft",
        "Was in storage with my teammate, we prove each other innocent",
        "A repair tool is missing, Mark must have taken it",
    ],
    defenses: &[
        "I have circuit inspection reports! {accuser} says I sabotaged the system, total nonsense!",
        "One of Lucy's repair tools is missing, she's up to something! {accuser} don't be fooled!",
        "My teammate and I vouch for each other! {accuser} says I'm the impostor, where's your evidence?",
        "Kai damaged the circuits during repairs! {accuser} doesn't question him, but accuses me?",
    ],
    keywords: &[],
    report_brief: "You are disguised as a Technician and can forge inspection reports. \
        Imitate the technician's circuit talk or say your teammate can vouch for you.",
    defense_brief: "Use 'equipment aging' or 'sensor failure' as excuses, counterattack \
        the crew, and shift blame to your teammate if exposed.",
};
