use mobile_motion::animation::groups::BodyKind;
use mobile_motion::animation::resolver::{AnimationContext, AnimationGroupResolver};
use mobile_motion::config::MotionConfig;
use mobile_motion::entities::equipment::HandItems;
use mobile_motion::telemetry::logging::{self, LogConfig};
use mobile_motion::{AnimationCapability, AnimationTable, Direction};

fn usage() -> String {
    "usage: anim_audit <animation-table.yaml> [motion-config.yaml]".to_string()
}

fn kind_label(kind: BodyKind) -> &'static str {
    match kind {
        BodyKind::Monster => "monster",
        BodyKind::SeaMonster => "sea",
        BodyKind::Animal => "animal",
        BodyKind::Human => "human",
        BodyKind::Equipment => "equip",
        BodyKind::Unknown => "unknown",
    }
}

fn main() -> Result<(), String> {
    let args: Vec<String> = std::env::args().collect();
    let table_path = args.get(1).ok_or_else(usage)?;
    let mut config = match args.get(2) {
        Some(path) => MotionConfig::load(path).map_err(|err| err.to_string())?,
        None => MotionConfig::default(),
    };
    config.apply_env_overrides();
    logging::init(&LogConfig::from(&config.log))?;

    let table = AnimationTable::load(table_path).map_err(|err| err.to_string())?;
    let resolver = AnimationGroupResolver::new(&table);

    println!("animation table audit:");
    println!("- file: {}", table_path);
    println!("- max body id: {}", table.max_body_id());
    println!("- bodies: {}", table.len());

    let mut missing_stand = Vec::new();
    for entry in table.bodies() {
        let standing = AnimationContext::standing(entry.body, Direction::South);
        let walking = AnimationContext {
            walking: true,
            ..standing
        };
        let running = AnimationContext {
            running: true,
            ..walking
        };
        let war = AnimationContext {
            war_mode: true,
            hands: HandItems {
                one_handed: Some(0x0201),
                two_handed: None,
            },
            ..standing
        };
        let stand = resolver.resolve_group(&standing);
        println!(
            "- {:#06x} {:<7} stand={} walk={} run={} war={}",
            entry.body,
            kind_label(entry.kind),
            stand,
            resolver.resolve_group(&walking),
            resolver.resolve_group(&running),
            resolver.resolve_group(&war),
        );
        if !table.exists(table.convert_body(entry.body), stand) {
            missing_stand.push(entry.body);
        }
    }

    if !missing_stand.is_empty() {
        println!("bodies without frames for their stand group:");
        for body in &missing_stand {
            println!("- {:#06x}", body);
        }
        return Err(format!("{} bodies cannot stand", missing_stand.len()));
    }
    Ok(())
}
