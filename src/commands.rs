use std::fmt;

use tetherstone_core::{BlockPos, DimensionId, Facing, ItemKind};
use tetherstone_world::{Authority, BlockEntity, InteractionResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandError {
    message: String,
}

impl CommandError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CommandError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SandboxCommand {
    Help,
    Place { pos: BlockPos, entity: BlockEntity },
    Clear { pos: BlockPos },
    Give { item: ItemKind },
    Select { slot: usize },
    Sneak { sneaking: bool },
    Authority { authority: Authority },
    Dimension { dimension: DimensionId },
    Use { pos: BlockPos, side: Facing },
    UseAir,
    Tooltip,
    Resolve { origin: BlockPos },
}

impl SandboxCommand {
    /// Verb used as the event kind.
    pub fn verb(&self) -> &'static str {
        match self {
            SandboxCommand::Help => "help",
            SandboxCommand::Place { .. } => "place",
            SandboxCommand::Clear { .. } => "clear",
            SandboxCommand::Give { .. } => "give",
            SandboxCommand::Select { .. } => "select",
            SandboxCommand::Sneak { .. } => "sneak",
            SandboxCommand::Authority { .. } => "authority",
            SandboxCommand::Dimension { .. } => "dimension",
            SandboxCommand::Use { .. } => "use",
            SandboxCommand::UseAir => "use_air",
            SandboxCommand::Tooltip => "tooltip",
            SandboxCommand::Resolve { .. } => "resolve",
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub lines: Vec<String>,
}

pub trait CommandContext {
    /// Place a block entity in the current dimension, returning the kind it replaced.
    fn place_block_entity(&mut self, pos: BlockPos, entity: BlockEntity) -> Option<&'static str>;
    fn clear_block_entity(&mut self, pos: BlockPos) -> bool;

    /// Attempt to give one item to the player. Returns false if the inventory is full.
    fn give_item(&mut self, item: ItemKind) -> bool;
    fn select_slot(&mut self, slot: usize) -> bool;

    fn set_sneaking(&mut self, sneaking: bool);
    fn set_authority(&mut self, authority: Authority);
    fn set_dimension(&mut self, dimension: DimensionId);

    /// Use the held provider on a block face. `None` if no provider is held.
    fn use_on_block(&mut self, pos: BlockPos, side: Facing) -> Option<InteractionResult>;
    /// Use the held provider in the air. `None` if no provider is held.
    fn use_item(&mut self) -> Option<InteractionResult>;
    /// Whether the last interaction flagged the inventory for saving (clears the flag).
    fn take_inventory_dirty(&mut self) -> bool;

    /// Tooltip of the held provider. `None` if no provider is held.
    fn tooltip(&self) -> Option<Vec<String>>;
    /// Describe every provider target reachable from `origin`.
    fn resolve(&self, origin: BlockPos) -> Vec<String>;
}

pub fn execute_command(ctx: &mut impl CommandContext, cmd: SandboxCommand) -> CommandOutput {
    let mut out = CommandOutput::default();
    match cmd {
        SandboxCommand::Help => {
            out.lines.extend(help_lines());
        }
        SandboxCommand::Place { pos, entity } => {
            let kind = entity.kind_name();
            match ctx.place_block_entity(pos, entity) {
                Some(old) => out.lines.push(format!("Replaced {old} at {pos} with {kind}")),
                None => out.lines.push(format!("Placed {kind} at {pos}")),
            }
        }
        SandboxCommand::Clear { pos } => {
            if ctx.clear_block_entity(pos) {
                out.lines.push(format!("Cleared {pos}"));
            } else {
                out.lines.push(format!("Nothing to clear at {pos}"));
            }
        }
        SandboxCommand::Give { item } => {
            if ctx.give_item(item) {
                out.lines.push(format!("Gave 1× {}", item.name()));
            } else {
                out.lines.push("Inventory full".to_string());
            }
        }
        SandboxCommand::Select { slot } => {
            if ctx.select_slot(slot) {
                out.lines.push(format!("Selected slot {slot}"));
            } else {
                out.lines.push(format!("Error: slot {slot} is not a hotbar slot"));
            }
        }
        SandboxCommand::Sneak { sneaking } => {
            ctx.set_sneaking(sneaking);
            out.lines
                .push(format!("Sneaking {}", if sneaking { "on" } else { "off" }));
        }
        SandboxCommand::Authority { authority } => {
            ctx.set_authority(authority);
            out.lines.push(format!("Authority set to {authority:?}"));
        }
        SandboxCommand::Dimension { dimension } => {
            ctx.set_dimension(dimension);
            out.lines.push(format!("Moved to {dimension}"));
        }
        SandboxCommand::Use { pos, side } => {
            match ctx.use_on_block(pos, side) {
                Some(result) => out.lines.push(result_line(result)),
                None => out.lines.push("Not holding a provider".to_string()),
            }
            if ctx.take_inventory_dirty() {
                out.lines.push("Inventory changed".to_string());
            }
        }
        SandboxCommand::UseAir => {
            match ctx.use_item() {
                Some(result) => out.lines.push(result_line(result)),
                None => out.lines.push("Not holding a provider".to_string()),
            }
            if ctx.take_inventory_dirty() {
                out.lines.push("Inventory changed".to_string());
            }
        }
        SandboxCommand::Tooltip => match ctx.tooltip() {
            Some(lines) => out.lines.extend(lines),
            None => out.lines.push("Not holding a provider".to_string()),
        },
        SandboxCommand::Resolve { origin } => {
            let targets = ctx.resolve(origin);
            if targets.is_empty() {
                out.lines.push(format!("No provider targets reachable from {origin}"));
            }
            out.lines.extend(targets);
        }
    }
    out
}

fn result_line(result: InteractionResult) -> String {
    match result {
        InteractionResult::Success => "Success".to_string(),
        InteractionResult::Pass => "Pass".to_string(),
    }
}

fn help_lines() -> Vec<String> {
    vec![
        "Commands:".to_string(),
        "place <x> <y> <z> <chest|hopper|furnace|tank|sign>".to_string(),
        "clear <x> <y> <z>".to_string(),
        "give <item_provider|fluid_provider>".to_string(),
        "select <slot>".to_string(),
        "sneak <on|off>".to_string(),
        "authority <authoritative|observer>".to_string(),
        "dimension <id>".to_string(),
        "use <x> <y> <z> <side>".to_string(),
        "use_air".to_string(),
        "tooltip".to_string(),
        "resolve <x> <y> <z>".to_string(),
    ]
}

pub fn parse_command(input: &str) -> Result<SandboxCommand, CommandError> {
    let input = input.trim();
    let input = input.strip_prefix('/').unwrap_or(input).trim();
    if input.is_empty() {
        return Ok(SandboxCommand::Help);
    }

    let mut parts = input.split_whitespace();
    let cmd = parts
        .next()
        .ok_or_else(|| CommandError::new("Missing command"))?
        .to_ascii_lowercase();
    let args: Vec<&str> = parts.collect();

    match cmd.as_str() {
        "help" | "?" => Ok(SandboxCommand::Help),
        "place" => {
            if args.len() != 4 {
                return Err(CommandError::new(
                    "Usage: place <x> <y> <z> <chest|hopper|furnace|tank|sign>",
                ));
            }
            let pos = parse_pos(&args[..3])?;
            let entity = BlockEntity::from_kind(args[3])
                .ok_or_else(|| CommandError::new(format!("Unknown block entity: {}", args[3])))?;
            Ok(SandboxCommand::Place { pos, entity })
        }
        "clear" => {
            if args.len() != 3 {
                return Err(CommandError::new("Usage: clear <x> <y> <z>"));
            }
            Ok(SandboxCommand::Clear {
                pos: parse_pos(&args)?,
            })
        }
        "give" => {
            if args.len() != 1 {
                return Err(CommandError::new("Usage: give <item_provider|fluid_provider>"));
            }
            Ok(SandboxCommand::Give {
                item: parse_item(args[0])?,
            })
        }
        "select" => {
            let [slot] = args[..] else {
                return Err(CommandError::new("Usage: select <slot>"));
            };
            let slot = slot
                .parse::<usize>()
                .map_err(|_| CommandError::new(format!("Invalid slot: {slot}")))?;
            Ok(SandboxCommand::Select { slot })
        }
        "sneak" => {
            let [state] = args[..] else {
                return Err(CommandError::new("Usage: sneak <on|off>"));
            };
            let sneaking = match state.to_ascii_lowercase().as_str() {
                "on" | "true" | "1" => true,
                "off" | "false" | "0" => false,
                _ => return Err(CommandError::new(format!("Invalid sneak state: {state}"))),
            };
            Ok(SandboxCommand::Sneak { sneaking })
        }
        "authority" => {
            let [name] = args[..] else {
                return Err(CommandError::new("Usage: authority <authoritative|observer>"));
            };
            let authority = Authority::parse(name)
                .ok_or_else(|| CommandError::new(format!("Unknown authority: {name}")))?;
            Ok(SandboxCommand::Authority { authority })
        }
        "dimension" | "dim" => {
            let [id] = args[..] else {
                return Err(CommandError::new("Usage: dimension <id>"));
            };
            let dimension = match id.to_ascii_lowercase().as_str() {
                "overworld" => DimensionId::OVERWORLD,
                "nether" => DimensionId::NETHER,
                "end" => DimensionId::END,
                other => other
                    .parse::<i32>()
                    .map(DimensionId)
                    .map_err(|_| CommandError::new(format!("Invalid dimension: {id}")))?,
            };
            Ok(SandboxCommand::Dimension { dimension })
        }
        "use" => {
            if args.len() != 4 {
                return Err(CommandError::new("Usage: use <x> <y> <z> <side>"));
            }
            let pos = parse_pos(&args[..3])?;
            let side = Facing::parse(args[3])
                .ok_or_else(|| CommandError::new(format!("Invalid side: {}", args[3])))?;
            Ok(SandboxCommand::Use { pos, side })
        }
        "use_air" => Ok(SandboxCommand::UseAir),
        "tooltip" => Ok(SandboxCommand::Tooltip),
        "resolve" => {
            if args.len() != 3 {
                return Err(CommandError::new("Usage: resolve <x> <y> <z>"));
            }
            Ok(SandboxCommand::Resolve {
                origin: parse_pos(&args)?,
            })
        }
        _ => Err(CommandError::new(format!("Unknown command: {cmd}. Try help"))),
    }
}

fn parse_pos(args: &[&str]) -> Result<BlockPos, CommandError> {
    let mut coords = [0i32; 3];
    for (coord, arg) in coords.iter_mut().zip(args) {
        *coord = arg
            .parse::<i32>()
            .map_err(|_| CommandError::new(format!("Invalid block coordinate: {arg}")))?;
    }
    let pos = BlockPos::new(coords[0], coords[1], coords[2]);
    if !pos.is_packable() {
        return Err(CommandError::new(format!("Position {pos} is outside the world")));
    }
    Ok(pos)
}

fn parse_item(token: &str) -> Result<ItemKind, CommandError> {
    match token.trim().to_ascii_lowercase().as_str() {
        "item_provider" => Ok(ItemKind::ItemProvider),
        "fluid_provider" => Ok(ItemKind::FluidProvider),
        other => {
            if let Some(id) = other.strip_prefix("block:") {
                let id = id
                    .parse::<u16>()
                    .map_err(|_| CommandError::new(format!("Invalid block id: {id}")))?;
                return Ok(ItemKind::Block(id));
            }
            Err(CommandError::new(format!("Unknown item: {token}")))
        }
    }
}
