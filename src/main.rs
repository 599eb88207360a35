use chain_stock_sim::chain::{Edge, SupplyChain};
use chain_stock_sim::io::{demand, reporting};
use chain_stock_sim::model::Node;
use chain_stock_sim::model::node::PolicyParams;
use chain_stock_sim::simulation::Simulator;
use chain_stock_sim::strategy::{ConstantLeadTime, FractionalRelease, RsqControl, ScriptedSales};

fn main() {
    println!("=== Multi-Echelon Supply Chain Simulation ===");

    // 1. GENERATE DEMAND
    // The classic "Step" pattern: demand jumps from 4 to 8 at period 5. This
    // is the scenario known for triggering the bullwhip effect as it
    // propagates up through reorder-point policies.
    let periods = 20;
    let demand_schedule = demand::generate_classic_step_demand(periods, 4, 8);
    println!("Demand schedule (leaf): {:?}", demand_schedule);

    // 2. BUILD THE CHAIN
    // Root: Distributor ("D"), stocks and ships the finished good.
    // Leaf: Retailer ("R"), faces customer demand and orders from D.
    let distributor = Node::new("D")
        .with_stock("D", 100)
        .with_policy(PolicyParams {
            order_quantity: 40,
            reorder_level: 30,
            review_time: 1,
            safety_stock: 0,
        })
        .with_lead_time(ConstantLeadTime(2));

    let retailer = Node::new("R")
        .with_stock("R", 20)
        .with_policy(PolicyParams {
            order_quantity: 20,
            reorder_level: 15,
            review_time: 1,
            safety_stock: 0,
        })
        .with_predecessor("D", 1)
        .with_sales(ScriptedSales::from_flat(demand_schedule))
        .with_lead_time(ConstantLeadTime(1));

    let sc = SupplyChain::new(vec![distributor, retailer], vec![Edge::new("D", "R", 1)])
        .expect("chain construction should not fail for a well-formed two-node BOM");

    // 3. RUN THE SIMULATION
    let mut sim = Simulator::new(sc, RsqControl, FractionalRelease);
    println!("Running simulation for {periods} periods...");
    let records = match sim.run(periods as u32) {
        Ok(records) => records,
        Err(e) => {
            eprintln!("Simulation aborted: {e}");
            return;
        }
    };

    // 4. EXPORT RESULTS
    let output_file = "simulation_results.csv";
    match reporting::write_metrics_csv(output_file, &records) {
        Ok(_) => println!("Success! Data written to ./{}", output_file),
        Err(e) => eprintln!("Error writing CSV: {}", e),
    }

    // 5. SUMMARIZE
    let total_backordered: i64 = records
        .iter()
        .filter(|r| r.event == "sales-backordered")
        .map(|r| r.quantity)
        .sum();
    let total_orders: i64 = records.iter().filter(|r| r.event == "order").map(|r| r.quantity).sum();

    println!("\n=== Summary ===");
    println!("Total units backordered at retailer: {total_backordered}");
    println!("Total units ordered across the chain: {total_orders}");
    println!("\nSimulation complete.");
}
