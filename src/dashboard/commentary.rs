//! Static prose shown under the charts

pub const PAGE_TITLE: &str = "Lebanon's External Debt Visualizations";

pub const INTRO: &str = "Explore Lebanon's external debt trends across the years (1960 - 2022) with interactive visualizations.";

pub const SAMPLE_LABEL: &str = "View Data Sample";

pub const LINE_HEADING: &str = "Line Chart: External Debt Over the Years";
pub const LINE_SLIDER_LABEL: &str = "Select year range for line chart:";

pub const SCATTER_HEADING: &str = "Scatter Plot: External Debt Distribution";
pub const SCATTER_SLIDER_LABEL: &str = "Select year range for scatter plot:";
pub const SCATTER_BLURB: &str = "This scatter plot provides a more detailed view of Lebanon's external debt at individual points across the selected time range.";

/// Interpretation block rendered below both charts
pub const INSIGHTS_HTML: &str = r#"<h4>Line Chart:</h4>
<ul>
  <li>The <strong>line chart</strong> visualizes the overall trend in Lebanon&rsquo;s external debt. It helps to observe whether the debt was increasing, stabilizing, or decreasing over the selected periods.</li>
  <li>For example, Lebanon's external debt increased substantially from <strong>2008</strong> to <strong>2010</strong>, rising from around <strong>$44 billion</strong> to over <strong>$80 billion</strong>. This period may reflect significant economic changes or borrowing patterns during that time leading to the 2019 economic crisis.</li>
  <li>By focusing on particular ranges using the slider, you can see how specific periods of financial history, such as economic crises or recoveries, affected the debt. This visualization highlights long-term patterns, which are useful for tracking economic changes.</li>
</ul>
<h4>Scatter Plot:</h4>
<ul>
  <li>The <strong>scatter plot</strong> complements the line chart by focusing on individual debt values at specific points in time. This chart can help identify outliers or patterns that are not as visible in the line chart.</li>
  <li>Between <strong>2000</strong> and <strong>2013</strong>, the scatter plot shows consistently high debt values, fluctuating between <strong>$20 billion</strong> and <strong>$62 billion</strong>, reflecting Lebanon's increasing reliance on external debt during that decade.</li>
  <li>By adjusting the slider, you can zoom in on particular years to better understand how Lebanon&rsquo;s debt was distributed over the years. Unusual spikes or dips in the scatter plot may indicate specific events, such as financial crises or changes in government policies, affecting the country&rsquo;s debt.</li>
</ul>
<h4>Combining Both Charts:</h4>
<ul>
  <li>Both visualizations together provide a comprehensive view of Lebanon&rsquo;s external debt. While the line chart gives a broad overview of the trend, the scatter plot offers a more granular look at individual data points.</li>
  <li>Using the sliders, you can explore different time ranges and understand how the debt evolved during critical moments in Lebanon's financial history. For instance, the charts reveal a significant rise in debt between <strong>2000</strong> and <strong>2010</strong>, followed by a more stable but high level of debt in the subsequent years.</li>
</ul>
<p>In conclusion, these visualizations allow for an in-depth analysis of Lebanon&rsquo;s external debt by exploring both trends and granular data points. The ability to interactively adjust the time range makes it easier to understand how Lebanon&rsquo;s debt evolved during various periods.</p>
"#;
