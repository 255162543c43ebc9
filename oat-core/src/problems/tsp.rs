#[cfg(test)]
#[path = "../../tests/unit/problems/tsp_test.rs"]
mod tsp_test;

use crate::algorithms::GeneticOperators;
use crate::problem::{Objective, Problem};
use crate::solution::{Evaluation, Solution};
use crate::utils::*;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::PathBuf;

/// A closed tour visiting every city exactly once.
#[derive(Clone, Debug)]
pub struct Tour {
    cities: Vec<usize>,
    evaluation: Evaluation,
}

impl Tour {
    /// Creates a new unevaluated instance of `Tour`.
    pub fn new(cities: Vec<usize>) -> Self {
        Self { cities, evaluation: Evaluation::default() }
    }

    /// Returns cities in visiting order.
    pub fn cities(&self) -> &[usize] {
        self.cities.as_slice()
    }
}

impl Solution for Tour {
    fn evaluation(&self) -> &Evaluation {
        &self.evaluation
    }

    fn evaluation_mut(&mut self) -> &mut Evaluation {
        &mut self.evaluation
    }
}

/// Specifies where city coordinates come from.
#[derive(Clone, Debug)]
pub enum TspSource {
    /// Coordinates are known upfront.
    Coordinates(Vec<(Float, Float)>),
    /// Coordinates are read from a TSPLIB file with `EUC_2D` edge weights.
    File(PathBuf),
}

/// A symmetric travelling salesman problem: minimize a closed tour length.
///
/// The distance matrix is built in `initialise_before_run` and released in `cleanup_after_run`.
pub struct TspObjective {
    name: String,
    source: TspSource,
    is_rounded: bool,
    known_optimum: Option<Float>,
    coordinates: Vec<(Float, Float)>,
    distances: Vec<Float>,
}

impl TspObjective {
    /// Creates a new instance of `TspObjective`.
    pub fn new(name: &str, source: TspSource) -> Self {
        let coordinates = match &source {
            TspSource::Coordinates(coordinates) => coordinates.clone(),
            TspSource::File(_) => vec![],
        };

        Self { name: name.to_string(), source, is_rounded: false, known_optimum: None, coordinates, distances: vec![] }
    }

    /// Rounds distances to the nearest integer as TSPLIB does.
    pub fn with_rounding(mut self, is_rounded: bool) -> Self {
        self.is_rounded = is_rounded;
        self
    }

    /// Sets a known optimal tour length.
    pub fn with_known_optimum(mut self, optimum: Float) -> Self {
        self.known_optimum = Some(optimum);
        self
    }

    /// Returns amount of cities.
    pub fn size(&self) -> usize {
        self.coordinates.len()
    }

    /// Returns true if the distance matrix is built.
    pub fn has_distance_matrix(&self) -> bool {
        !self.distances.is_empty()
    }

    /// Returns a distance between two cities.
    pub fn distance(&self, from: usize, to: usize) -> Float {
        let size = self.size();
        if self.distances.len() == size * size {
            self.distances[from * size + to]
        } else {
            self.calculate_distance(from, to)
        }
    }

    /// Returns the length of a closed tour.
    pub fn tour_length(&self, cities: &[usize]) -> Float {
        match (cities.first(), cities.last()) {
            (Some(&first), Some(&last)) => {
                cities.windows(2).map(|leg| self.distance(leg[0], leg[1])).sum::<Float>() + self.distance(last, first)
            }
            _ => 0.,
        }
    }

    fn calculate_distance(&self, from: usize, to: usize) -> Float {
        let ((x1, y1), (x2, y2)) = (self.coordinates[from], self.coordinates[to]);
        let distance = ((x1 - x2).powi(2) + (y1 - y2).powi(2)).sqrt();

        if self.is_rounded { distance.round() } else { distance }
    }
}

impl Objective for TspObjective {
    type Solution = Tour;

    fn name(&self) -> &str {
        self.name.as_str()
    }

    fn fitness(&self, solution: &Self::Solution) -> Float {
        self.tour_length(solution.cities())
    }

    fn is_minimization(&self) -> bool {
        true
    }

    fn check_safety(&self, solution: &Self::Solution) -> GenericResult<()> {
        let size = self.size();
        if solution.cities.len() != size {
            return Err(format!("tour must visit {size} cities, visits {}", solution.cities.len()).into());
        }

        let mut visited = vec![false; size];
        solution.cities.iter().try_for_each(|&city| match visited.get_mut(city) {
            Some(visited) if !*visited => {
                *visited = true;
                Ok(())
            }
            Some(_) => Err(format!("city {city} is visited more than once").into()),
            None => Err(format!("unknown city {city}").into()),
        })
    }

    fn initialise_before_run(&mut self) -> GenericResult<()> {
        if let TspSource::File(path) = &self.source {
            let file = File::open(path).map_err(|err| format!("cannot open '{}': {err}", path.display()))?;
            let instance = read_tsplib(BufReader::new(file))?;
            self.coordinates = instance.coordinates;
        }

        if self.coordinates.len() < 3 {
            return Err(format!("expected at least 3 cities, got {}", self.coordinates.len()).into());
        }

        let size = self.size();
        self.distances = (0..size * size).map(|idx| self.calculate_distance(idx / size, idx % size)).collect();

        Ok(())
    }

    fn cleanup_after_run(&mut self) {
        self.distances = vec![];
        if let TspSource::File(_) = self.source {
            self.coordinates = vec![];
        }
    }

    fn known_optimum(&self) -> Option<Float> {
        self.known_optimum
    }
}

/// A TSPLIB instance.
#[derive(Clone, Debug)]
pub struct TsplibInstance {
    /// An instance name.
    pub name: Option<String>,
    /// City coordinates in file order.
    pub coordinates: Vec<(Float, Float)>,
}

/// Reads a symmetric TSPLIB instance with `EUC_2D` edge weights. Please note that it is
/// a very basic implementation of the format specification.
pub fn read_tsplib<R: Read>(reader: BufReader<R>) -> GenericResult<TsplibInstance> {
    let mut lines = reader.lines();
    let mut name = None;
    let mut dimension = None;

    loop {
        let line = lines.next().ok_or_else(|| GenericError::from("unexpected end of file: no NODE_COORD_SECTION"))??;
        let line = line.trim();

        if line.is_empty() {
            continue;
        }

        if line == "NODE_COORD_SECTION" {
            break;
        }

        let (key, value) = line.split_once(':').map(|(key, value)| (key.trim(), value.trim())).unwrap_or((line, ""));

        match key {
            "NAME" => name = Some(value.to_string()),
            "TYPE" if value != "TSP" => return Err(format!("expecting 'TSP' as TYPE, got '{value}'").into()),
            "EDGE_WEIGHT_TYPE" if value != "EUC_2D" => {
                return Err(format!("expecting 'EUC_2D' as EDGE_WEIGHT_TYPE, got '{value}'").into());
            }
            "DIMENSION" => {
                dimension = Some(value.parse::<usize>().map_err(|err| format!("cannot parse DIMENSION: '{err}'"))?)
            }
            _ => {}
        }
    }

    let dimension = dimension.ok_or_else(|| GenericError::from("DIMENSION is not specified"))?;

    let mut coordinates = Vec::with_capacity(dimension);
    for _ in 0..dimension {
        let line = lines.next().ok_or_else(|| GenericError::from("unexpected end of NODE_COORD_SECTION"))??;
        let data = line.split_whitespace().collect::<Vec<_>>();

        if data.len() != 3 {
            return Err(format!("unexpected coord data: '{}'", line.trim()).into());
        }

        coordinates.push((parse_float(data[1], "cannot parse x")?, parse_float(data[2], "cannot parse y")?));
    }

    Ok(TsplibInstance { name, coordinates })
}

fn parse_float(data: &str, err_msg: &str) -> GenericResult<Float> {
    data.parse::<Float>().map_err(|err| format!("{err_msg}: '{err}'").into())
}

/// Genetic operators over tours: random permutation, order crossover and inversion mutation.
#[derive(Default)]
pub struct TourOperators;

impl GeneticOperators<TspObjective> for TourOperators {
    fn create(&self, problem: &Problem<TspObjective>, random: &dyn Random) -> Tour {
        Tour::new(random.permutation(problem.objective().size()))
    }

    fn crossover(&self, _: &Problem<TspObjective>, first: &Tour, second: &Tour, random: &dyn Random) -> Tour {
        let size = first.cities.len();
        if size < 2 {
            return Tour::new(first.cities.clone());
        }

        let (start, end) = random_segment(size, random);

        let mut child = vec![usize::MAX; size];
        child[start..=end].copy_from_slice(&first.cities[start..=end]);

        let mut used = vec![false; size];
        first.cities[start..=end].iter().filter(|&&city| city < size).for_each(|&city| used[city] = true);

        let mut donors = second.cities.iter().filter(|&&city| city < size && !used[city]);
        (0..size).filter(|idx| *idx < start || *idx > end).for_each(|idx| {
            if let Some(&city) = donors.next() {
                child[idx] = city;
            }
        });

        Tour::new(child)
    }

    fn mutate(&self, _: &Problem<TspObjective>, solution: &mut Tour, random: &dyn Random) {
        if solution.cities.len() < 2 {
            return;
        }

        let (start, end) = random_segment(solution.cities.len(), random);
        solution.cities[start..=end].reverse();
    }
}

fn random_segment(size: usize, random: &dyn Random) -> (usize, usize) {
    let first = random.uniform_int(0, size as i32 - 1) as usize;
    let second = random.uniform_int(0, size as i32 - 1) as usize;

    (first.min(second), first.max(second))
}
