// Maze pursuit game: one food-eating maximizer chased by ghosts
//
// Layout text uses `%` for walls, `.` for food, `o` for capsules, `P` for the
// maximizer (agent 0) and `G` for each ghost (agents 1.., in reading order).
// Rows are read top to bottom; North decreases `y`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::config::GameRulesConfig;
use crate::environment::GameState;
use crate::types::{SearchValue, MAXIMIZER};

/// Names accepted by `builtin_layout`
pub const LAYOUT_NAMES: [&str; 4] = [
    "test_classic",
    "minimax_classic",
    "trapped_classic",
    "small_classic",
];

const TEST_CLASSIC: &str = "\
%%%%%
% . %
%.G.%
% . %
%. .%
%   %
%  .%
%   %
%P .%
%%%%%";

const MINIMAX_CLASSIC: &str = "\
%%%%%%%%%
%.P    G%
% %.%G%%%
%G    %%%
%%%%%%%%%";

const TRAPPED_CLASSIC: &str = "\
%%%%%%%%
%   P G%
%G%%%%%%
%....  %
%%%%%%%%";

const SMALL_CLASSIC: &str = "\
%%%%%%%%%%%%%%%%%%%%
%......%G  G%......%
%.%%...%%  %%...%%.%
%.%o.%........%.o%.%
%.%%.%.%%%%%%.%.%%.%
%........P.........%
%%%%%%%%%%%%%%%%%%%%";

/// Returns the layout text registered under `name`
pub fn builtin_layout(name: &str) -> Option<&'static str> {
    match name {
        "test_classic" => Some(TEST_CLASSIC),
        "minimax_classic" => Some(MINIMAX_CLASSIC),
        "trapped_classic" => Some(TRAPPED_CLASSIC),
        "small_classic" => Some(SMALL_CLASSIC),
        _ => None,
    }
}

/// 2D cell position
#[derive(Deserialize, Serialize, Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub fn manhattan(&self, other: &Coord) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }
}

/// Moves available in the maze; `Stop` is the maximizer's no-op
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    North,
    South,
    East,
    West,
    Stop,
}

impl Direction {
    /// All directions in enumeration order (this order drives tie-breaks)
    pub fn all() -> [Direction; 5] {
        [
            Direction::North,
            Direction::South,
            Direction::East,
            Direction::West,
            Direction::Stop,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::North => "north",
            Direction::South => "south",
            Direction::East => "east",
            Direction::West => "west",
            Direction::Stop => "stop",
        }
    }

    pub fn reverse(&self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
            Direction::Stop => Direction::Stop,
        }
    }

    /// Calculates the next coordinate when moving in this direction
    pub fn apply(&self, coord: &Coord) -> Coord {
        match self {
            Direction::North => Coord { x: coord.x, y: coord.y - 1 },
            Direction::South => Coord { x: coord.x, y: coord.y + 1 },
            Direction::East => Coord { x: coord.x + 1, y: coord.y },
            Direction::West => Coord { x: coord.x - 1, y: coord.y },
            Direction::Stop => *coord,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "north" => Ok(Direction::North),
            "south" => Ok(Direction::South),
            "east" => Ok(Direction::East),
            "west" => Ok(Direction::West),
            "stop" => Ok(Direction::Stop),
            _ => Err(format!("Invalid direction: {}", s)),
        }
    }
}

/// Static part of a game: walls and scoring rules, shared by every state
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Maze {
    pub width: i32,
    pub height: i32,
    walls: Vec<bool>,
    pub rules: GameRulesConfig,
}

impl Maze {
    /// Cells outside the maze count as walls
    pub fn is_wall(&self, coord: &Coord) -> bool {
        if coord.x < 0 || coord.y < 0 || coord.x >= self.width || coord.y >= self.height {
            return true;
        }
        self.walls[(coord.y * self.width + coord.x) as usize]
    }
}

/// Position and status of one agent
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct AgentState {
    pub position: Coord,
    pub start: Coord,
    pub direction: Direction,
    pub scared_timer: u32,
}

impl AgentState {
    fn spawn(position: Coord) -> Self {
        AgentState {
            position,
            start: position,
            direction: Direction::Stop,
            scared_timer: 0,
        }
    }

    pub fn is_scared(&self) -> bool {
        self.scared_timer > 0
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Running,
    Win,
    Lose,
}

/// One immutable snapshot of the maze game
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct GridState {
    maze: Arc<Maze>,
    food: Vec<Coord>,
    capsules: Vec<Coord>,
    agents: Vec<AgentState>,
    score: SearchValue,
    outcome: Outcome,
}

impl GridState {
    /// Parses layout text into the initial state
    pub fn from_layout(text: &str, rules: GameRulesConfig) -> Result<Self, String> {
        let rows: Vec<&str> = text
            .trim_matches('\n')
            .lines()
            .map(|l| l.trim_end_matches('\r'))
            .collect();

        if rows.is_empty() {
            return Err("Layout is empty".to_string());
        }

        let width = rows[0].chars().count();
        let height = rows.len();
        let mut walls = Vec::with_capacity(width * height);
        let mut food = Vec::new();
        let mut capsules = Vec::new();
        let mut player = None;
        let mut ghosts = Vec::new();

        for (y, row) in rows.iter().enumerate() {
            if row.chars().count() != width {
                return Err(format!(
                    "Layout row {} has width {}, expected {}",
                    y + 1,
                    row.chars().count(),
                    width
                ));
            }

            for (x, cell) in row.chars().enumerate() {
                let coord = Coord {
                    x: x as i32,
                    y: y as i32,
                };
                walls.push(cell == '%');
                match cell {
                    '%' | ' ' => {}
                    '.' => food.push(coord),
                    'o' => capsules.push(coord),
                    'P' => {
                        if player.replace(coord).is_some() {
                            return Err("Layout has more than one 'P'".to_string());
                        }
                    }
                    'G' => ghosts.push(coord),
                    other => {
                        return Err(format!(
                            "Unknown layout character '{}' at row {}, column {}",
                            other,
                            y + 1,
                            x + 1
                        ))
                    }
                }
            }
        }

        let player = player.ok_or("Layout has no 'P'")?;
        let mut agents = vec![AgentState::spawn(player)];
        agents.extend(ghosts.into_iter().map(AgentState::spawn));

        Ok(GridState {
            maze: Arc::new(Maze {
                width: width as i32,
                height: height as i32,
                walls,
                rules,
            }),
            food,
            capsules,
            agents,
            score: 0.0,
            outcome: Outcome::Running,
        })
    }

    /// Builds the initial state of a built-in layout
    pub fn from_named_layout(name: &str, rules: GameRulesConfig) -> Result<Self, String> {
        let text = builtin_layout(name).ok_or_else(|| {
            format!(
                "Unknown layout '{}' (expected one of: {})",
                name,
                LAYOUT_NAMES.join(", ")
            )
        })?;
        Self::from_layout(text, rules)
    }

    pub fn food(&self) -> &[Coord] {
        &self.food
    }

    pub fn capsules(&self) -> &[Coord] {
        &self.capsules
    }

    pub fn agents(&self) -> &[AgentState] {
        &self.agents
    }

    pub fn ghosts(&self) -> &[AgentState] {
        &self.agents[1..]
    }

    pub fn player_position(&self) -> Coord {
        self.agents[MAXIMIZER].position
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Moves that keep an agent off walls
    fn open_moves(&self, from: &Coord) -> Vec<Direction> {
        Direction::all()
            .iter()
            .filter(|dir| !self.maze.is_wall(&dir.apply(from)))
            .copied()
            .collect()
    }

    /// Ghosts never stop and only turn back at dead ends
    fn ghost_moves(&self, ghost: &AgentState) -> Vec<Direction> {
        let mut moves: Vec<Direction> = self
            .open_moves(&ghost.position)
            .into_iter()
            .filter(|d| *d != Direction::Stop)
            .collect();

        let reverse = ghost.direction.reverse();
        if moves.len() > 1 && ghost.direction != Direction::Stop {
            moves.retain(|d| *d != reverse);
        }
        moves
    }

    fn move_player(&mut self, action: Direction) {
        let rules = self.maze.rules.clone();
        let player = &mut self.agents[MAXIMIZER];
        let target = action.apply(&player.position);
        if !self.maze.is_wall(&target) {
            player.position = target;
            player.direction = action;
        }
        let position = player.position;

        self.score -= rules.time_penalty;

        if let Some(i) = self.food.iter().position(|f| *f == position) {
            self.food.swap_remove(i);
            self.score += rules.food_reward;
            if self.food.is_empty() {
                self.score += rules.win_bonus;
                self.outcome = Outcome::Win;
            }
        }

        if let Some(i) = self.capsules.iter().position(|c| *c == position) {
            self.capsules.swap_remove(i);
            for ghost in self.agents.iter_mut().skip(1) {
                ghost.scared_timer = rules.scared_time;
            }
        }

        for ghost in 1..self.agents.len() {
            self.resolve_contact(ghost);
        }
    }

    fn move_ghost(&mut self, agent: usize, action: Direction) {
        let ghost = &mut self.agents[agent];
        let target = action.apply(&ghost.position);
        if action != Direction::Stop && !self.maze.is_wall(&target) {
            ghost.position = target;
            ghost.direction = action;
        }
        if ghost.scared_timer > 0 {
            ghost.scared_timer -= 1;
        }

        self.resolve_contact(agent);
    }

    /// Applies the result of the maximizer and `ghost` sharing a cell
    fn resolve_contact(&mut self, ghost: usize) {
        if self.agents[ghost].position != self.agents[MAXIMIZER].position {
            return;
        }

        let rules = &self.maze.rules;
        if self.agents[ghost].is_scared() {
            self.score += rules.ghost_eat_reward;
            let eaten = &mut self.agents[ghost];
            eaten.position = eaten.start;
            eaten.direction = Direction::Stop;
            eaten.scared_timer = 0;
        } else if self.outcome != Outcome::Win {
            self.score -= rules.lose_penalty;
            self.outcome = Outcome::Lose;
        }
    }

    /// Text picture of the current state
    pub fn render(&self) -> String {
        let mut out = String::new();
        for y in 0..self.maze.height {
            for x in 0..self.maze.width {
                let coord = Coord { x, y };
                let ghost = self.ghosts().iter().find(|g| g.position == coord);
                let cell = if self.player_position() == coord {
                    'P'
                } else if let Some(g) = ghost {
                    if g.is_scared() {
                        'g'
                    } else {
                        'G'
                    }
                } else if self.maze.is_wall(&coord) {
                    '%'
                } else if self.food.contains(&coord) {
                    '.'
                } else if self.capsules.contains(&coord) {
                    'o'
                } else {
                    ' '
                };
                out.push(cell);
            }
            out.push('\n');
        }
        out
    }
}

impl GameState for GridState {
    type Action = Direction;

    fn is_terminal(&self) -> bool {
        self.outcome != Outcome::Running
    }

    fn legal_actions(&self, agent: usize) -> Vec<Direction> {
        if self.is_terminal() {
            return Vec::new();
        }

        match self.agents.get(agent) {
            Some(state) if agent == MAXIMIZER => self.open_moves(&state.position),
            Some(ghost) => self.ghost_moves(ghost),
            None => Vec::new(),
        }
    }

    fn successor(&self, agent: usize, action: &Direction) -> Self {
        let mut next = self.clone();
        if self.is_terminal() || agent >= self.agents.len() {
            return next;
        }

        if agent == MAXIMIZER {
            next.move_player(*action);
        } else {
            next.move_ghost(agent, *action);
        }
        next
    }

    fn num_agents(&self) -> usize {
        self.agents.len()
    }

    fn score(&self) -> SearchValue {
        self.score
    }

    fn no_op_action(&self) -> Direction {
        Direction::Stop
    }
}
